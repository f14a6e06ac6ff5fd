use crate::core::context::Context;
use crate::core::models::*;
use crate::core::passes::Pass;
use crate::utils::Result;
use async_trait::async_trait;
use std::path::Path;

/// Style compilation backend. `bundle`/`emit_css` carry entry-mode builds,
/// where the compiler applies the passes itself; `compile` owns the whole
/// transformation for chunk-mode builds. Backend calls may populate the
/// context registries but never touch the disk.
#[async_trait]
pub trait StyleBackend: Send + Sync {
    fn bundle(&self, entry: &EntrySource, ctx: &mut Context) -> Result<Vec<Rule>>;

    fn emit_css(&self, rule: &Rule) -> String;

    async fn compile(
        &self,
        chunks: &ChunkSet,
        ctx: &mut Context,
        passes: &[Pass],
        base_chunk_file_name: Option<&str>,
    ) -> Result<Artifact>;
}

/// File system operations interface
#[async_trait]
pub trait FileSystemService: Send + Sync {
    async fn write_file(&self, path: &Path, content: &str) -> Result<()>;
    async fn create_directory(&self, path: &Path) -> Result<()>;
}
