//! Whole-tree repair.
//!
//! An adherence pass renumbers every module and topic, then brings each topic
//! back to canonical form:
//!
//! - a topic with none of its five content files gets the full scaffold,
//! - content files that exist but are empty are regenerated from templates,
//! - once all five have content, `Cumulative.md` is (re)written.
//!
//! A topic with some content files missing and others present is reported as
//! incomplete and left alone.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn, Instrument};

use syllabus_common_log::spans::{adherence_span, record_error, Timer};

use crate::error::TreeResult;
use crate::layout::{Role, TopicFile};
use crate::templater::TemplateContext;
use crate::workspace::Workspace;

/// What an adherence pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdherenceReport {
    pub modules: usize,
    pub topics: usize,
    /// Directories renamed by renumbering.
    pub renamed: usize,
    /// Topics that had no content files and were fully scaffolded.
    pub populated: usize,
    /// Empty content files rewritten from templates.
    pub regenerated: usize,
    /// Cumulative files written.
    pub cumulative: usize,
    /// Topics with some content files missing.
    pub incomplete: Vec<PathBuf>,
    /// Modules or topics whose repair failed, with the reason.
    pub failures: Vec<String>,
}

impl AdherenceReport {
    pub fn is_clean(&self) -> bool {
        self.incomplete.is_empty() && self.failures.is_empty()
    }
}

/// Content of the five content files, `None` for a missing file.
pub type TopicContents = [Option<String>; 5];

impl Workspace {
    /// Renumber and repair the whole tree.
    ///
    /// A failure renumbering the modules aborts the pass. Failures inside one
    /// module or topic are recorded in the report and the pass moves on.
    pub async fn adhere(&mut self) -> TreeResult<AdherenceReport> {
        let span = adherence_span(&self.root().display().to_string());
        async {
            let result = self.adhere_inner().await;
            if let Err(e) = &result {
                record_error(e);
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn adhere_inner(&mut self) -> TreeResult<AdherenceReport> {
        let timer = Timer::start("adherence");
        let mut report = AdherenceReport::default();

        let pass = self.renumber_modules().await?;
        report.renamed += pass.renamed.len();

        for module_dir in self.module_dirs().await? {
            report.modules += 1;
            if let Err(e) = self.fix_module(&module_dir, &mut report).await {
                warn!(module = %module_dir, error = %e, "module repair failed");
                report.failures.push(format!("{module_dir}: {e}"));
            }
        }

        // Topic counts changed under the index.
        self.rebuild_index().await?;

        let elapsed = timer.finish();
        info!(
            modules = report.modules,
            topics = report.topics,
            renamed = report.renamed,
            populated = report.populated,
            regenerated = report.regenerated,
            cumulative = report.cumulative,
            incomplete = report.incomplete.len(),
            failures = report.failures.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "adherence pass complete"
        );
        Ok(report)
    }

    async fn fix_module(&mut self, module_dir: &str, report: &mut AdherenceReport) -> TreeResult<()> {
        let module_path = self.module_path(module_dir);
        let pass = self.renumber_topics(&module_path).await?;
        report.renamed += pass.renamed.len();

        let module_name = self.naming().display_name(module_dir);
        for topic_dir in self.topic_dirs(module_dir).await? {
            report.topics += 1;
            let topic_path = module_path.join(&topic_dir);
            let topic_name = self.naming().display_name(&topic_dir);
            let context = TemplateContext::new(module_name.clone(), topic_name);

            if let Err(e) = self.fix_topic(&topic_path, context, report).await {
                warn!(topic = %topic_path.display(), error = %e, "topic repair failed");
                report
                    .failures
                    .push(format!("{}: {e}", topic_path.display()));
            }
        }
        Ok(())
    }

    /// Repair one topic directory.
    pub async fn fix_topic(
        &self,
        topic_path: &Path,
        context: TemplateContext,
        report: &mut AdherenceReport,
    ) -> TreeResult<()> {
        let mut contents = self.load_contents(topic_path).await?;

        if contents.iter().all(Option::is_none) {
            self.populate_topic(topic_path, &context).await?;
            report.populated += 1;
            contents = self.load_contents(topic_path).await?;
        }

        for role in Role::ALL {
            let slot = &mut contents[role.index()];
            if slot.as_deref() != Some("") {
                continue;
            }
            let file = TopicFile::Content(role);
            let text = self.templater().render(file, &context);
            self.fs()
                .write_file(&topic_path.join(file.file_name()), text.as_bytes())
                .await?;
            *slot = Some(text);
            report.regenerated += 1;
        }

        if contents
            .iter()
            .all(|c| c.as_deref().is_some_and(|text| !text.is_empty()))
        {
            let context = context.with_contents(contents);
            self.templater()
                .write(self.fs(), topic_path, TopicFile::Cumulative, &context)
                .await?;
            report.cumulative += 1;
        } else if contents.iter().any(Option::is_none) {
            let missing: Vec<&str> = Role::ALL
                .iter()
                .filter(|role| contents[role.index()].is_none())
                .map(|role| role.file_name())
                .collect();
            warn!(
                topic = %topic_path.display(),
                missing = ?missing,
                "content files missing, topic left unrepaired"
            );
            report.incomplete.push(topic_path.to_path_buf());
        }
        Ok(())
    }

    /// Read the five content files of a topic.
    pub async fn load_contents(&self, topic_path: &Path) -> TreeResult<TopicContents> {
        let mut contents: TopicContents = Default::default();
        for role in Role::ALL {
            contents[role.index()] = self
                .fs()
                .read_text(&topic_path.join(role.file_name()))
                .await?;
        }
        Ok(contents)
    }
}
