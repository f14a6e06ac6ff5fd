use crate::core::context::Context;
use crate::core::interfaces::*;
use crate::core::models::*;
use crate::core::passes::Pass;
use crate::utils::{Logger, Result, Timer};
use std::path::PathBuf;
use std::sync::Arc;

/// Default registry file names, overridable per build through the
/// `minifyTagNames` / `minifyClassNames` string forms.
pub const DEFAULT_TAG_NAMES_FILE: &str = "tag_names.json";
pub const DEFAULT_CLASS_NAMES_FILE: &str = "class_names.json";

/// Pipeline handed to the backend's whole-chunk `compile`. Distinct from
/// `ENTRY_PASSES` on purpose: chunk-mode ownership of pass iteration sits
/// with the backend, entry-mode ownership with the compiler, and the two
/// pipelines are tested separately.
pub const CHUNK_PASSES: [Pass; 3] = [
    Pass::FlattenProperties,
    Pass::MinifyIdentifiers,
    Pass::CleanEmptyRules,
];

/// Fixed pipeline applied locally per entry in entry-mode builds.
pub const ENTRY_PASSES: [Pass; 3] = [
    Pass::FlattenProperties,
    Pass::MinifyIdentifiers,
    Pass::CleanEmptyRules,
];

/// Sequential, directory-creating writer. Entries are written strictly one
/// at a time, in input order, stopping at the first failure; files already
/// written stay on disk.
pub struct EmissionSequencer {
    fs: Arc<dyn FileSystemService>,
    output_root: PathBuf,
}

impl EmissionSequencer {
    pub fn new(fs: Arc<dyn FileSystemService>, output_root: PathBuf) -> Self {
        Self { fs, output_root }
    }

    pub async fn write_all(&self, entries: &[CompiledEntry]) -> Result<()> {
        for entry in entries {
            self.write_one(&entry.file_name, &entry.content).await?;
        }
        Ok(())
    }

    /// Create the parent directory, then write. Both steps complete before
    /// the next entry is touched.
    pub async fn write_one(&self, file_name: &str, content: &str) -> Result<()> {
        let full_path = self.output_root.join(file_name);
        if let Some(parent) = full_path.parent() {
            self.fs.create_directory(parent).await?;
        }
        self.fs.write_file(&full_path, content).await?;
        Logger::file_written(file_name, content.len());
        Ok(())
    }
}

/// Build orchestrator. Owns the per-build context and the fixed pass
/// pipelines; exposes the two build modes plus registry persistence.
pub struct Compiler {
    backend: Arc<dyn StyleBackend>,
    sequencer: EmissionSequencer,
    context: Context,
}

impl Compiler {
    pub fn new(
        backend: Arc<dyn StyleBackend>,
        fs: Arc<dyn FileSystemService>,
        context: Context,
        output_root: PathBuf,
    ) -> Self {
        Self {
            backend,
            sequencer: EmissionSequencer::new(fs, output_root),
            context,
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Chunk-mode build: the backend owns bundling, pass iteration and CSS
    /// emission for the whole chunk set; output order is the artifact's.
    pub async fn compile_chunks(
        &mut self,
        chunks: &ChunkSet,
        base_chunk_file_name: Option<&str>,
    ) -> Result<Vec<CompiledEntry>> {
        let _timer = Timer::start("chunk compilation");
        Logger::compiling_chunks(chunks.len());

        let artifact = self
            .backend
            .compile(chunks, &mut self.context, &CHUNK_PASSES, base_chunk_file_name)
            .await?;
        Ok(artifact.chunks)
    }

    /// Entry-mode build: bundle each entry, run the fixed pipeline
    /// pass-major over the surviving rules, join the emitted CSS. Entries
    /// are processed in map iteration order, which makes registry
    /// population order deterministic.
    pub async fn compile_entries(&mut self, entries: &EntryMap) -> Result<Vec<CompiledEntry>> {
        let _timer = Timer::start("entry compilation");
        Logger::compiling_entries(entries.len());

        let mut compiled = Vec::with_capacity(entries.len());
        for (file_name, source) in entries {
            let mut rules = self.backend.bundle(source, &mut self.context)?;
            for pass in ENTRY_PASSES {
                rules = rules
                    .into_iter()
                    .filter_map(|rule| pass.apply(rule, &mut self.context))
                    .collect();
            }
            Logger::entry_compiled(file_name, rules.len());

            let content: String = rules
                .iter()
                .map(|rule| self.backend.emit_css(rule))
                .collect::<Vec<_>>()
                .join("\n");
            compiled.push(CompiledEntry::new(file_name.clone(), content));
        }
        Ok(compiled)
    }

    /// Write compiled output to disk, one file at a time, in order.
    pub async fn emit(&self, entries: &[CompiledEntry]) -> Result<()> {
        self.sequencer.write_all(entries).await
    }

    /// Persist the tag-name registry as JSON. Must run after compilation;
    /// chainable.
    pub async fn write_tag_names(&self, out_file: &str) -> Result<&Self> {
        self.write_registry(out_file, self.context.tag_name_registry())
            .await?;
        Ok(self)
    }

    /// Persist the class-name registry as JSON. Must run after compilation;
    /// chainable.
    pub async fn write_class_names(&self, out_file: &str) -> Result<&Self> {
        self.write_registry(out_file, self.context.class_name_registry())
            .await?;
        Ok(self)
    }

    async fn write_registry(
        &self,
        out_file: &str,
        registry: &indexmap::IndexMap<String, String>,
    ) -> Result<()> {
        let json = serde_json::to_string_pretty(registry)?;
        self.sequencer.write_one(out_file, &json).await?;
        Logger::registry_written(out_file, registry.len());
        Ok(())
    }
}
