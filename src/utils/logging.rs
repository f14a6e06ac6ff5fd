use std::time::Instant;
use tracing::{debug, error, info, warn};

pub struct Logger;

impl Logger {
    pub fn init() {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("jstyle=info")),
            )
            .with_target(false)
            .init();
    }

    pub fn build_start(config: &str, output: &str) {
        info!("🔨 jstyle - Style Build");
        info!("📁 Config: {}", config);
        info!("📦 Output: {}", output);
    }

    pub fn compiling_entries(count: usize) {
        info!("⚡ Compiling {} entries", count);
    }

    pub fn compiling_chunks(count: usize) {
        info!("⚡ Compiling {} chunks", count);
    }

    pub fn entry_compiled(name: &str, rules: usize) {
        debug!("🎨 Compiled entry: {} ({} rules)", name, rules);
    }

    pub fn file_written(name: &str, size: usize) {
        debug!("💾 Wrote {} ({} bytes)", name, size);
    }

    pub fn registry_written(name: &str, len: usize) {
        info!("📒 Registry {} ({} names)", name, len);
    }

    pub fn nothing_to_build() {
        info!("⚡ No chunks or entries configured - nothing to build");
    }

    pub fn build_complete(files: usize, elapsed: std::time::Duration) {
        info!("✅ Build completed: {} files in {:.2?}", files, elapsed);
    }

    pub fn error(msg: &str) {
        error!("❌ {}", msg);
    }

    pub fn warn(msg: &str) {
        warn!("⚠️  {}", msg);
    }

    pub fn debug(msg: &str) {
        debug!("{}", msg);
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: &str) -> Self {
        debug!("⏱️  Starting: {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        debug!("⏱️  Completed: {} in {:.2?}", self.name, self.elapsed());
    }
}
