use crate::api::ApiClient;
use crate::config::Config;
use crate::router::Router;
use crate::screens::{RenderContext, ScreenContext};
use crate::tui::Tui;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{error, info};

/// UI loop tick: completions are collected and the screen redrawn this often
const TICK: Duration = Duration::from_millis(250);

/// Main application state
pub struct App {
    config: Config,
    config_path: PathBuf,
    tui: Tui,
    runtime: Runtime,
    router: Router<ApiClient>,
}

impl App {
    pub fn new(config: Config, config_path: PathBuf) -> Result<Self> {
        let api = ApiClient::new(&config.api).context("Failed to create API client")?;
        info!("orphanages service at {}", api.base_url());

        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        let tui = Tui::new()?;
        let router = Router::new(Arc::new(api), &config);

        Ok(Self {
            config,
            config_path,
            tui,
            runtime,
            router,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.tui.enter()?;
        let result = self.event_loop();
        self.router.shutdown();
        self.tui.exit()?;

        if let Err(e) = &result {
            error!("app exited with error: {:#}", e);
        }
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let ctx = ScreenContext::new(&self.config, self.runtime.handle());
        self.router.start(&ctx)?;

        let config_path = crate::utils::format_path_for_display(&self.config_path);
        loop {
            self.router.tick(&ctx)?;

            let render_ctx = RenderContext::new(&self.config);
            let router = &mut self.router;
            let mut render_result = Ok(());
            self.tui
                .terminal_mut()
                .draw(|frame| {
                    render_result = router.render(frame, &render_ctx, &config_path);
                })
                .context("Failed to draw")?;
            render_result?;

            if self.router.should_quit() {
                break;
            }

            if let Some(event) = self.tui.poll_event(TICK)? {
                self.router.handle_event(event, &ctx)?;
            }
        }
        Ok(())
    }
}
