use glam::Vec3;
use vr_workbench::avatar::{HandInput, TrackingInput};
use vr_workbench::cli::CliOverrides;
use vr_workbench::config::ShellConfig;
use vr_workbench::hud::TrackingConfidence;
use vr_workbench::surface::Pose;
use vr_workbench::time::FrameTimer;
use vr_workbench::VrShell;

const TICK_RATE: f32 = 90.0;
const SESSION_TICKS: u32 = 270;

/// Dry-run harness: drives the shell with a scripted tracking session and
/// prints the synthesized window events. Real XR input is supplied by the
/// host editor process.
fn main() {
    let overrides = match CliOverrides::parse_from_env() {
        Ok(parsed) => parsed.into_config_overrides(),
        Err(err) => {
            eprintln!("[cli] {err}");
            std::process::exit(2);
        }
    };
    let mut config = ShellConfig::load_or_default("vr_workbench.json");
    config.apply_overrides(&overrides);

    let mut shell = VrShell::new(&config);
    let delta = 1.0 / TICK_RATE;
    let mut wall = FrameTimer::new();

    // The player looks straight ahead while the right hand sweeps across the
    // right dock, pressing select partway through.
    let head = Pose::from_position(Vec3::new(0.0, 1.7, 0.0));
    for tick in 0..SESSION_TICKS {
        let sweep = tick as f32 / SESSION_TICKS as f32;
        let right = HandInput {
            pose: Pose::from_position(Vec3::new(0.35 + 0.2 * sweep, 1.55, 0.0)),
            select: (90..135).contains(&tick),
        };
        let input = TrackingInput {
            head,
            confidence: TrackingConfidence::High,
            hands: [HandInput::idle(), right],
        };
        for event in shell.tick(&input, delta) {
            println!("[{tick:03}] {event}");
        }
        wall.tick();
    }

    let dock = shell.right_dock();
    shell.forward_key(dock, 0x0D, true);
    shell.forward_key(dock, 0x0D, false);
    let input = TrackingInput {
        head,
        confidence: TrackingConfidence::High,
        hands: [HandInput::idle(), HandInput::idle()],
    };
    for event in shell.tick(&input, delta) {
        println!("[key] {event}");
    }

    if let Some(fps) = shell.avatar().performance_fps() {
        println!(
            "[shell] simulated {SESSION_TICKS} ticks in {:.1}ms wall time, smoothed fps {fps:.1}",
            wall.elapsed_seconds() * 1000.0
        );
    }
}
