//! Hidbridge OTG front-end entry point.
//!
//! Parses the CLI, loads the config file, installs the platform hook where
//! available, and runs the winit event loop driving the [`OtgDispatcher`].
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config() + CLI overrides
//!  └─ EventLoop::<UserEvent>::with_user_event()
//!  └─ KeyboardHookGuard (Windows only)
//!  └─ OtgApp (ApplicationHandler)
//!       └─ resumed()        -- creates WinitSurface + processors + dispatcher
//!       └─ window_event()   -- translates and dispatches
//!       └─ device_event()   -- relative pointer motion
//!       └─ user_event()     -- minimize requests from the hook thread
//! ```

use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use hidbridge_otg::application::OtgDispatcher;
use hidbridge_otg::infrastructure::processor::trace::{TraceKeyProcessor, TraceMouseProcessor};
use hidbridge_otg::infrastructure::processor::{KeyProcessor, MouseProcessor};
use hidbridge_otg::infrastructure::storage::config::{self, AppConfig};
use hidbridge_otg::infrastructure::window::winit_surface::{
    raw_event_from_device, raw_event_from_window, WinitSurface,
};

/// Forward keyboard and mouse input to an attached device.
#[derive(Debug, Parser)]
#[command(name = "hidbridge", version, about)]
struct Cli {
    /// Window title.
    #[arg(long)]
    title: Option<String>,

    /// Initial window position as X,Y.
    #[arg(long, value_name = "X,Y", value_parser = parse_pair::<i32>)]
    position: Option<(i32, i32)>,

    /// Window size as WIDTHxHEIGHT.
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_size)]
    size: Option<(u32, u32)>,

    /// Keep the window above all others.
    #[arg(long)]
    always_on_top: bool,

    /// Create the window without decorations.
    #[arg(long)]
    borderless: bool,

    /// Do not forward keyboard events.
    #[arg(long)]
    no_keyboard: bool,

    /// Do not forward mouse events (disables pointer capture).
    #[arg(long)]
    no_mouse: bool,

    /// Log level: error, warn, info, debug, trace.
    #[arg(long)]
    log_level: Option<String>,
}

fn parse_pair<T: std::str::FromStr>(s: &str) -> Result<(T, T), String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected two comma-separated values, got {s:?}"))?;
    let a = a.trim().parse().map_err(|_| format!("invalid value {a:?}"))?;
    let b = b.trim().parse().map_err(|_| format!("invalid value {b:?}"))?;
    Ok((a, b))
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let w = w.trim().parse().map_err(|_| format!("invalid width {w:?}"))?;
    let h = h
        .trim()
        .parse()
        .map_err(|_| format!("invalid height {h:?}"))?;
    Ok((w, h))
}

impl Cli {
    /// Overlays the CLI flags on top of the loaded configuration.
    fn apply_to(&self, cfg: &mut AppConfig) {
        if let Some(title) = &self.title {
            cfg.window.title = title.clone();
        }
        if let Some((x, y)) = self.position {
            cfg.window.x = Some(x);
            cfg.window.y = Some(y);
        }
        if let Some((w, h)) = self.size {
            cfg.window.width = Some(w);
            cfg.window.height = Some(h);
        }
        if self.always_on_top {
            cfg.window.always_on_top = true;
        }
        if self.borderless {
            cfg.window.borderless = true;
        }
        if self.no_keyboard {
            cfg.forward.keyboard = false;
        }
        if self.no_mouse {
            cfg.forward.mouse = false;
        }
        if let Some(level) = &self.log_level {
            cfg.app.log_level = level.clone();
        }
    }
}

/// Events injected into the winit loop from outside it.
#[derive(Debug, Clone, Copy, PartialEq)]
enum UserEvent {
    /// The platform escape key asked for the window to be minimized.
    /// Only the Windows keyboard hook produces this today.
    #[cfg_attr(not(target_os = "windows"), allow(dead_code))]
    MinimizeRequested,
}

/// The winit application: owns the dispatcher once the window exists.
struct OtgApp {
    cfg: AppConfig,
    window: Option<Arc<Window>>,
    window_id: Option<WindowId>,
    dispatcher: Option<OtgDispatcher>,
}

impl OtgApp {
    fn new(cfg: AppConfig) -> Self {
        Self {
            cfg,
            window: None,
            window_id: None,
            dispatcher: None,
        }
    }
}

impl ApplicationHandler<UserEvent> for OtgApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.dispatcher.is_some() {
            return;
        }

        let surface = match WinitSurface::new(event_loop, &self.cfg.window) {
            Ok(surface) => surface,
            Err(e) => {
                error!("could not create the window: {e}");
                event_loop.exit();
                return;
            }
        };
        self.window = Some(surface.window());
        self.window_id = Some(surface.window_id());

        let keyboard = self
            .cfg
            .forward
            .keyboard
            .then(|| Arc::new(TraceKeyProcessor) as Arc<dyn KeyProcessor>);
        let mouse = self
            .cfg
            .forward
            .mouse
            .then(|| Arc::new(TraceMouseProcessor) as Arc<dyn MouseProcessor>);

        self.dispatcher = Some(OtgDispatcher::new(Box::new(surface), keyboard, mouse));
        info!(
            keyboard = self.cfg.forward.keyboard,
            mouse = self.cfg.forward.mouse,
            "session ready"
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if Some(window_id) != self.window_id {
            return;
        }
        let Some(dispatcher) = self.dispatcher.as_mut() else {
            return;
        };

        match &event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                return;
            }
            WindowEvent::CursorEntered { .. } => {
                dispatcher.surface_mut().note_pointer_boundary(true);
                return;
            }
            WindowEvent::CursorLeft { .. } => {
                dispatcher.surface_mut().note_pointer_boundary(false);
                return;
            }
            _ => {}
        }

        if let Some(raw) = raw_event_from_window(&event) {
            if let Err(e) = dispatcher.handle_event(raw) {
                warn!("event dropped: {e}");
            }
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let Some(dispatcher) = self.dispatcher.as_mut() else {
            return;
        };
        if let Some(raw) = raw_event_from_device(&event) {
            if let Err(e) = dispatcher.handle_event(raw) {
                warn!("event dropped: {e}");
            }
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::MinimizeRequested => {
                if let Some(window) = &self.window {
                    window.set_minimized(true);
                }
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = config::load_config()?;
    cli.apply_to(&mut cfg);

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cfg.app.log_level.clone())),
        )
        .init();

    info!("hidbridge starting");

    // First run: persist a template config so the options are discoverable.
    // CLI overrides are deliberately not written back.
    match config::config_file_path() {
        Ok(path) if !path.exists() => {
            if let Err(e) = config::save_config(&AppConfig::default()) {
                warn!("could not write default config: {e}");
            }
        }
        _ => {}
    }

    let event_loop = EventLoop::<UserEvent>::with_user_event().build()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    // ── Platform escape-key hook (Windows only) ──────────────────────────────
    #[cfg(target_os = "windows")]
    let _hook_guard = {
        use hidbridge_otg::infrastructure::platform::windows_hook::KeyboardHookGuard;

        let proxy = event_loop.create_proxy();
        match KeyboardHookGuard::install(move || {
            let _ = proxy.send_event(UserEvent::MinimizeRequested);
        }) {
            Ok(guard) => Some(guard),
            Err(e) => {
                warn!("running without the F4 escape hook: {e}");
                None
            }
        }
    };

    let mut app = OtgApp::new(cfg);
    event_loop.run_app(&mut app)?;

    info!("hidbridge stopped");
    Ok(())
}
