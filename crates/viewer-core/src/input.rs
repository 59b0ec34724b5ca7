//! Platform-neutral input events and their mapping to viewer commands.

use crate::camera::ScrollDirection;
use crate::render_mode::{Blend, ModeCommand, Shading};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    F,
    Z,
    X,
    A,
    S,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    ButtonPressed(PointerButton),
    Scroll(ScrollDirection),
    KeyPressed(Key),
    Resized { width: u32, height: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    ToggleCapture,
    RandomizeColor,
    Zoom(ScrollDirection),
    ReportFps,
    Mode(ModeCommand),
    Resize { width: u32, height: u32 },
}

pub fn key_command(key: Key) -> Option<Command> {
    match key {
        Key::F => Some(Command::ReportFps),
        Key::Z => Some(Command::Mode(ModeCommand::Shade(Shading::Lambert))),
        Key::X => Some(Command::Mode(ModeCommand::Shade(Shading::Phong))),
        Key::A => Some(Command::Mode(ModeCommand::Blend(Blend::Opaque))),
        Key::S => Some(Command::Mode(ModeCommand::Blend(Blend::Transparent))),
        Key::Other => None,
    }
}

pub fn command_for(event: InputEvent) -> Option<Command> {
    match event {
        InputEvent::ButtonPressed(PointerButton::Left) => Some(Command::ToggleCapture),
        InputEvent::ButtonPressed(PointerButton::Right) => Some(Command::RandomizeColor),
        InputEvent::ButtonPressed(PointerButton::Other) => None,
        InputEvent::Scroll(direction) => Some(Command::Zoom(direction)),
        InputEvent::KeyPressed(key) => key_command(key),
        InputEvent::Resized { width, height } => Some(Command::Resize { width, height }),
    }
}

/// Lines printed once at startup.
pub const HELP_TEXT: &str = "\
----
L3 Menger Cube
----
Argv(2): msaa, maxfps
e.g; ./menger-viewer 16 60
----
Left Click = Focus toggle camera control
Right Click = Random colour
Scroll = Zoom
F = FPS to console.
A = Opaque.
S = Transparent.
Z = Lambertian Shading.
X = Phong Shading.
----";
