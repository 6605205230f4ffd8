use bevy_app::{App, Plugin};

use super::systems::celebration::CelebrationsPlugin;
use super::systems::matcher::CalendarScanPlugin;

/// Aggregate plugin that installs both simulation domains: the hourly
/// calendar scan and the per-tick celebration lifecycle.
pub struct RedLetterPlugin;

impl Plugin for RedLetterPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((CalendarScanPlugin, CelebrationsPlugin));
    }
}
