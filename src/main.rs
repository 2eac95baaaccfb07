use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};
use orefall::player::{
    apply_controller_settings, cursor_grab, player_look, player_motion, respawn_player,
};
use orefall::settings::loader as settings_loader;
use orefall::settings::loader::SETTINGS_DIR;
use orefall::ui::{
    draw_ground_probe, setup_debug_overlay, spawn_debug_overlay, toggle_debug_overlay,
    toggle_probe_gizmo, update_debug_overlay,
};

mod app;

fn main() {
    let settings = settings_loader::load_settings_from_dir(SETTINGS_DIR);
    let settings_watcher = settings_loader::setup_settings_watcher(SETTINGS_DIR)
        .unwrap_or_else(|_| settings_loader::SettingsWatcher::stub());

    let mut bevy_app = App::new();

    bevy_app
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Orefall".to_string(),
                position: WindowPosition::Centered(MonitorSelection::Primary),
                present_mode: PresentMode::AutoNoVsync,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .add_plugins(LogDiagnosticsPlugin::default());

    bevy_app.insert_resource(settings);
    bevy_app.insert_resource(settings_watcher);

    bevy_app.add_systems(Startup, setup_debug_overlay);
    bevy_app.add_systems(Startup, spawn_debug_overlay);
    bevy_app.add_systems(Startup, app::setup);

    bevy_app.add_systems(Update, settings_loader::check_settings_changes);
    bevy_app.add_systems(Update, apply_controller_settings);
    bevy_app.add_systems(Update, cursor_grab);
    bevy_app.add_systems(Update, player_look);
    bevy_app.add_systems(Update, player_motion);
    bevy_app.add_systems(Update, respawn_player);
    bevy_app.add_systems(Update, toggle_debug_overlay);
    bevy_app.add_systems(Update, toggle_probe_gizmo);
    bevy_app.add_systems(Update, update_debug_overlay);
    bevy_app.add_systems(Update, draw_ground_probe);

    bevy_app.run();
}
