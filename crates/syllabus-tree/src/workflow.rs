//! Interactive batch creation of topics.

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{TreeError, TreeResult};
use crate::prompt::Prompter;
use crate::scaffold::TopicOutcome;
use crate::workspace::Workspace;

/// Choice offered after the existing modules to start a new one.
pub const NEW_MODULE_CHOICE: &str = "+ Create New Module";

pub const MODULE_PROMPT: &str = "Which module should the topics go in?";
pub const NEW_MODULE_PROMPT: &str = "New Module Name?";
pub const COUNT_PROMPT: &str = "How many topics do you want to create?";
pub const TOPIC_PROMPT: &str = "Topic Name?";

/// Tally of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub module: String,
    pub requested: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// The user cancelled partway; topics after that point were not attempted.
    pub cancelled: bool,
    pub failures: Vec<String>,
}

impl BatchOutcome {
    fn new(module: String, requested: usize) -> Self {
        Self {
            module,
            requested,
            ..Default::default()
        }
    }

    fn record(&mut self, outcome: TopicOutcome) {
        match outcome {
            TopicOutcome::Created(_) => self.succeeded += 1,
            TopicOutcome::Failed { topic, error } => {
                self.failed += 1;
                self.failures.push(format!("{topic}: {error}"));
            }
        }
    }
}

/// Parse the answer to the topic count prompt.
pub fn parse_topic_count(answer: &str) -> TreeResult<usize> {
    match answer.trim().parse::<i64>() {
        Ok(n) if n > 0 => usize::try_from(n)
            .map_err(|_| TreeError::invalid_input(format!("topic count too large: {n}"))),
        Ok(n) => Err(TreeError::invalid_input(format!(
            "topic count must be positive, got {n}"
        ))),
        Err(_) => Err(TreeError::invalid_input(format!(
            "topic count must be a number, got {:?}",
            answer.trim()
        ))),
    }
}

/// Ask for a module, a topic count and each topic name, creating topics as
/// their names arrive.
///
/// Cancelling the module or count prompt, or an invalid count, returns an
/// error before anything is created. Cancelling a topic name stops the batch
/// and returns the tally so far. Individual creation failures are counted
/// and the batch continues.
pub async fn add_topics(
    workspace: &mut Workspace,
    prompter: &mut dyn Prompter,
) -> TreeResult<BatchOutcome> {
    let mut options = workspace.module_names();
    options.push(NEW_MODULE_CHOICE.to_string());

    let mut module = prompter.ask_choice(MODULE_PROMPT, &options)?;
    if module == NEW_MODULE_CHOICE {
        module = prompter.ask_question(NEW_MODULE_PROMPT)?;
    }
    if module.trim().is_empty() {
        return Err(TreeError::invalid_input("module name is empty"));
    }

    let requested = parse_topic_count(&prompter.ask_question(COUNT_PROMPT)?)?;
    let mut batch = BatchOutcome::new(module, requested);

    for i in 0..requested {
        let topic = match prompter.ask_question(TOPIC_PROMPT) {
            Ok(topic) => topic,
            Err(e) => {
                let err = TreeError::from(e);
                if !matches!(err, TreeError::Cancelled) {
                    return Err(err);
                }
                info!(created = batch.succeeded, remaining = requested - i, "batch cancelled");
                batch.cancelled = true;
                break;
            }
        };
        let outcome = workspace.create_topic(&batch.module, &topic).await;
        batch.record(outcome);
    }

    log_batch(&batch);
    Ok(batch)
}

/// Create topics with known names in one module.
pub async fn create_topics(
    workspace: &mut Workspace,
    module: &str,
    topics: &[String],
) -> BatchOutcome {
    let mut batch = BatchOutcome::new(module.to_string(), topics.len());
    for topic in topics {
        let outcome = workspace.create_topic(module, topic).await;
        batch.record(outcome);
    }
    log_batch(&batch);
    batch
}

fn log_batch(batch: &BatchOutcome) {
    if batch.failed > 0 {
        warn!(
            module = %batch.module,
            succeeded = batch.succeeded,
            failed = batch.failed,
            "batch finished with failures"
        );
    } else {
        info!(module = %batch.module, succeeded = batch.succeeded, "batch finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFs;
    use crate::prompt::ScriptedPrompter;
    use std::sync::Arc;
    use syllabus_common_config::SyllabusConfig;
    use test_case::test_case;

    async fn open(fs: &MemoryFs) -> Workspace {
        Workspace::open("/c", Arc::new(fs.clone()), SyllabusConfig::default())
            .await
            .unwrap()
    }

    #[test_case("3", 3)]
    #[test_case(" 12 ", 12)]
    fn test_parse_topic_count(answer: &str, expected: usize) {
        assert_eq!(parse_topic_count(answer).unwrap(), expected);
    }

    #[test_case("0")]
    #[test_case("-2")]
    #[test_case("three")]
    #[test_case("")]
    fn test_parse_topic_count_rejects(answer: &str) {
        assert!(matches!(
            parse_topic_count(answer),
            Err(TreeError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_batch_into_new_module() {
        let fs = MemoryFs::new();
        let mut ws = open(&fs).await;
        let mut prompter = ScriptedPrompter::new([
            Some(NEW_MODULE_CHOICE),
            Some("sorting"),
            Some("2"),
            Some("bubble sort"),
            Some("merge sort"),
        ]);

        let batch = add_topics(&mut ws, &mut prompter).await.unwrap();

        assert_eq!(batch.requested, 2);
        assert_eq!(batch.succeeded, 2);
        assert!(!batch.cancelled);
        assert_eq!(
            fs.children("/c/modules/001-Sorting"),
            vec!["001-Bubble-Sort", "002-Merge-Sort"]
        );
        assert_eq!(
            prompter.asked(),
            &[MODULE_PROMPT, NEW_MODULE_PROMPT, COUNT_PROMPT, TOPIC_PROMPT, TOPIC_PROMPT]
        );
    }

    #[tokio::test]
    async fn test_batch_into_existing_module() {
        let fs = MemoryFs::new();
        fs.add_dir("/c/modules/001-Arrays/001-Intro");
        let mut ws = open(&fs).await;
        let mut prompter = ScriptedPrompter::new([Some("Arrays"), Some("1"), Some("search")]);

        let batch = add_topics(&mut ws, &mut prompter).await.unwrap();

        assert_eq!(batch.succeeded, 1);
        assert!(fs.is_dir("/c/modules/001-Arrays/002-Search"));
    }

    #[tokio::test]
    async fn test_cancel_on_second_name_stops_batch() {
        let fs = MemoryFs::new();
        let mut ws = open(&fs).await;
        let mut prompter = ScriptedPrompter::new([
            Some(NEW_MODULE_CHOICE),
            Some("Arrays"),
            Some("3"),
            Some("Traversal"),
            None,
            Some("Never Asked"),
        ]);

        let batch = add_topics(&mut ws, &mut prompter).await.unwrap();

        assert_eq!(batch.requested, 3);
        assert_eq!(batch.succeeded, 1);
        assert_eq!(batch.failed, 0);
        assert!(batch.cancelled);
        assert_eq!(fs.children("/c/modules/001-Arrays"), vec!["001-Traversal"]);
        assert_eq!(prompter.asked().len(), 5);
    }

    #[tokio::test]
    async fn test_invalid_count_creates_nothing() {
        let fs = MemoryFs::new();
        let mut ws = open(&fs).await;
        let mut prompter =
            ScriptedPrompter::new([Some(NEW_MODULE_CHOICE), Some("Arrays"), Some("zero")]);

        let err = add_topics(&mut ws, &mut prompter).await.unwrap_err();

        assert!(matches!(err, TreeError::InvalidInput(_)));
        assert!(fs.children("/c/modules").is_empty());
    }

    #[tokio::test]
    async fn test_cancel_module_choice() {
        let fs = MemoryFs::new();
        let mut ws = open(&fs).await;
        let mut prompter = ScriptedPrompter::new([None::<&str>]);

        assert!(matches!(
            add_topics(&mut ws, &mut prompter).await,
            Err(TreeError::Cancelled)
        ));
    }

    #[tokio::test]
    async fn test_failures_are_tallied() {
        let fs = MemoryFs::new();
        fs.deny_writes("/c/modules/001-Arrays/002-Broken/Quiz.gift");
        let mut ws = open(&fs).await;

        let names = ["Fine", "Broken", "Also Fine"].map(String::from);
        let batch = create_topics(&mut ws, "Arrays", &names).await;

        assert_eq!(batch.requested, 3);
        assert_eq!(batch.succeeded, 2);
        assert_eq!(batch.failed, 1);
        assert!(batch.failures[0].starts_with("Broken:"));
        assert_eq!(
            fs.children("/c/modules/001-Arrays"),
            vec!["001-Fine", "002-Broken", "003-Also-Fine"]
        );
    }
}
