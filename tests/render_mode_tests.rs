mod common;

use common::{Call, FakeBackend};
use glam::Vec3;
use viewer_core::constants::STATIC_LIGHT_POSITION;
use viewer_core::render_mode::{
    UNIFORM_COLOR, UNIFORM_LIGHT_POSITION, UNIFORM_NORMAL_MATRIX, UNIFORM_OPACITY,
};
use viewer_core::{
    Blend, ColorState, LightState, ModeCommand, ModeMachine, RenderMode, Shading, UniformSet,
};

fn startup() -> (FakeBackend, ModeMachine, LightState) {
    let mut backend = FakeBackend::new();
    let mut light = LightState::default();
    let machine = ModeMachine::startup(&mut backend, &mut light);
    (backend, machine, light)
}

#[test]
fn startup_is_phong_transparent_half_opacity_white() {
    let (backend, machine, _) = startup();
    assert_eq!(
        machine.mode(),
        RenderMode {
            shading: Shading::Phong,
            blend: Blend::Transparent
        }
    );
    assert_eq!(backend.blend, Some(Blend::Transparent));
    assert_eq!(backend.f32(Shading::Phong, UNIFORM_OPACITY), Some(0.5));
    assert_eq!(backend.vec3(Shading::Phong, UNIFORM_COLOR), Some(Vec3::ONE));
    assert!(machine.uniforms().normal_matrix.is_some());
}

#[test]
fn lambert_has_no_normal_matrix() {
    let backend = FakeBackend::new();
    let set = UniformSet::resolve(&backend, Shading::Lambert);
    assert_eq!(set.normal_matrix, None);
    assert!(set.projection.is_some() && set.view.is_some());
    assert!(Shading::Phong.uses_normal_matrix());
    assert!(!Shading::Lambert.uses_normal_matrix());
}

#[test]
fn missing_uniform_resolves_to_none() {
    let backend = FakeBackend::without(&[UNIFORM_NORMAL_MATRIX, UNIFORM_OPACITY]);
    let set = UniformSet::resolve(&backend, Shading::Phong);
    assert_eq!(set.normal_matrix, None);
    assert_eq!(set.opacity, None);
    assert!(set.color.is_some());
}

#[test]
fn switching_shading_repushes_persistent_uniforms() {
    let (mut backend, mut machine, mut light) = startup();
    light.position = Vec3::new(4.0, 5.0, 6.0);
    let color = ColorState {
        r: 0.2,
        g: -0.4,
        b: 0.9,
    };
    backend.clear_calls();
    machine.apply(
        ModeCommand::Shade(Shading::Lambert),
        &mut backend,
        &mut light,
        &color,
    );

    assert_eq!(backend.calls[0], Call::UseProgram(Shading::Lambert));
    assert_eq!(machine.mode().shading, Shading::Lambert);
    assert_eq!(machine.mode().blend, Blend::Transparent);
    assert_eq!(machine.uniforms().normal_matrix, None);
    assert_eq!(light.position, STATIC_LIGHT_POSITION);
    assert_eq!(
        backend.vec3(Shading::Lambert, UNIFORM_LIGHT_POSITION),
        Some(STATIC_LIGHT_POSITION)
    );
    assert_eq!(backend.f32(Shading::Lambert, UNIFORM_OPACITY), Some(1.0));
    assert_eq!(backend.vec3(Shading::Lambert, UNIFORM_COLOR), Some(color.rgb()));
    assert!(!backend.calls.iter().any(|c| matches!(c, Call::Blend(_))));
}

#[test]
fn lambert_phong_lambert_keeps_opacity_and_colour() {
    let (mut backend, mut machine, mut light) = startup();
    let first = ColorState {
        r: 0.1,
        g: 0.2,
        b: 0.3,
    };
    let second = ColorState {
        r: -0.5,
        g: 0.5,
        b: 1.0,
    };

    machine.apply(ModeCommand::Shade(Shading::Lambert), &mut backend, &mut light, &first);
    assert_eq!(machine.opacity(), 1.0);
    assert_eq!(backend.vec3(Shading::Lambert, UNIFORM_COLOR), Some(first.rgb()));

    machine.apply(ModeCommand::Shade(Shading::Phong), &mut backend, &mut light, &first);
    assert_eq!(backend.f32(Shading::Phong, UNIFORM_OPACITY), Some(1.0));
    assert_eq!(backend.vec3(Shading::Phong, UNIFORM_COLOR), Some(first.rgb()));
    assert!(machine.uniforms().normal_matrix.is_some());

    machine.apply(ModeCommand::Shade(Shading::Lambert), &mut backend, &mut light, &second);
    assert_eq!(backend.f32(Shading::Lambert, UNIFORM_OPACITY), Some(1.0));
    assert_eq!(backend.vec3(Shading::Lambert, UNIFORM_COLOR), Some(second.rgb()));
}

#[test]
fn blend_is_last_writer_wins_and_leaves_uniforms_alone() {
    let (mut backend, mut machine, mut light) = startup();
    let color = ColorState::default();
    backend.clear_calls();
    machine.apply(ModeCommand::Blend(Blend::Opaque), &mut backend, &mut light, &color);
    machine.apply(ModeCommand::Blend(Blend::Transparent), &mut backend, &mut light, &color);
    assert_eq!(machine.mode().blend, Blend::Transparent);
    assert_eq!(machine.mode().shading, Shading::Phong);
    assert_eq!(
        backend.calls,
        vec![Call::Blend(Blend::Opaque), Call::Blend(Blend::Transparent)]
    );
}
