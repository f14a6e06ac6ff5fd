use crate::core::context::Context;
use crate::core::interfaces::{FileSystemService, StyleBackend};
use crate::core::models::BuildConfig;
use crate::core::services::{Compiler, DEFAULT_CLASS_NAMES_FILE, DEFAULT_TAG_NAMES_FILE};
use crate::infrastructure::{RuleBackend, TokioFileSystemService};
use crate::utils::{ConfigLoader, JstyleError, Logger, Result};
use clap::{CommandFactory, Parser};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "jstyle")]
#[command(about = "Configuration-driven style build orchestrator")]
pub struct Cli {
    /// Config file
    #[arg(short, long, default_value = "jstyle.conf.json")]
    pub config: String,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub output: String,

    /// Define variable [key=value], repeatable
    #[arg(short, long = "define", value_name = "KEY=VALUE")]
    pub define: Vec<String>,
}

pub struct CliHandler;

impl CliHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn run(&self) -> Result<()> {
        // Initialize logging
        Logger::init();

        let cli = Cli::parse();
        self.execute(cli).await
    }

    pub async fn execute(&self, cli: Cli) -> Result<()> {
        let config_path = resolve_against_cwd(&cli.config)?;
        if !config_path.exists() {
            println!("Cannot find config file: {}\n", config_path.display());
            let _ = Cli::command().print_help();
            return Err(JstyleError::config(format!(
                "config file not found: {}",
                config_path.display()
            )));
        }
        let output_root = resolve_against_cwd(&cli.output)?;

        Logger::build_start(&cli.config, &cli.output);

        let definitions = ConfigLoader::parse_definitions(&cli.define)?;
        let config = ConfigLoader::load(&config_path, &definitions)?;

        self.run_build(config, output_root).await
    }

    /// Dispatch on the build mode, emit the compiled files, then the
    /// registries. Registry files are written only after every content
    /// file landed.
    pub async fn run_build(&self, config: BuildConfig, output_root: PathBuf) -> Result<()> {
        let started = Instant::now();

        let backend: Arc<dyn StyleBackend> = Arc::new(RuleBackend::new(config.modules.clone()));
        let fs: Arc<dyn FileSystemService> = Arc::new(TokioFileSystemService);
        let mut compiler = Compiler::new(backend, fs, Context::new(&config), output_root);

        let compiled = if let Some(chunks) = &config.chunks {
            compiler
                .compile_chunks(chunks, config.base_chunk_file_name.as_deref())
                .await?
        } else if let Some(entries) = &config.entries {
            compiler.compile_entries(entries).await?
        } else {
            Logger::nothing_to_build();
            return Ok(());
        };

        compiler.emit(&compiled).await?;

        if let Some(file) = config.minify_tag_names.file_name(DEFAULT_TAG_NAMES_FILE) {
            compiler.write_tag_names(file).await?;
        }
        if let Some(file) = config.minify_class_names.file_name(DEFAULT_CLASS_NAMES_FILE) {
            compiler.write_class_names(file).await?;
        }

        Logger::build_complete(compiled.len(), started.elapsed());
        Ok(())
    }
}

impl Default for CliHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_against_cwd(path: &str) -> Result<PathBuf> {
    let path = Path::new(path);
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir().map_err(JstyleError::Io)?.join(path))
    }
}
