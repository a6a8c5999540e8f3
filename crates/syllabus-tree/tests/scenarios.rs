//! End-to-end scenarios against the real file system.

use syllabus_common_config::SyllabusConfig;
use syllabus_test_utils::{assert_ok, TreeFixture};
use syllabus_tree::layout::{Role, CUMULATIVE_FILE};
use syllabus_tree::{
    workflow, ChangeReactor, Reaction, ScriptedPrompter, TreeEvent, Workspace,
};
use tokio::sync::mpsc;

async fn open(fixture: &TreeFixture) -> Workspace {
    assert_ok!(Workspace::open_local(fixture.root(), SyllabusConfig::default()).await)
}

#[tokio::test]
async fn create_first_module_and_topic() {
    let fixture = TreeFixture::new();
    let mut ws = open(&fixture).await;

    let outcome = ws.create_topic("Arrays", "Traversal").await;

    assert!(outcome.is_created(), "{outcome}");
    assert_eq!(
        fixture.children("modules/001-Arrays/001-Traversal"),
        vec![
            "001-Prerequisites-and-Learning-Objectives.md",
            "002-Description.md",
            "003-Real-World-Application.md",
            "004-Implementation.md",
            "005-Summary.md",
            "Quiz.gift",
        ]
    );
    for name in fixture.children("modules/001-Arrays/001-Traversal") {
        let text = fixture
            .read(format!("modules/001-Arrays/001-Traversal/{name}"))
            .unwrap();
        assert!(!text.is_empty(), "{name} is empty");
    }
    let index: Vec<_> = ws.index().iter().collect();
    assert_eq!(index, vec![("Arrays", 1)]);
}

#[tokio::test]
async fn disruptive_external_delete() {
    let fixture = TreeFixture::with_dirs(&["001-A", "002-B", "003-C"]);
    let ws = open(&fixture).await;
    let (_tx, rx) = mpsc::channel(8);
    let mut reactor = ChangeReactor::new(ws, rx).with_settle(std::time::Duration::ZERO);

    let deleted = fixture.path("modules/002-B");
    std::fs::remove_dir(&deleted).unwrap();
    let reaction = assert_ok!(reactor.handle(TreeEvent::Deleted(deleted)).await);

    assert!(matches!(reaction, Reaction::Renumbered { .. }));
    assert_eq!(fixture.children("modules"), vec!["001-A", "002-C"]);
    assert_eq!(reactor.workspace().index().lookup_ordinal("C"), Some(2));
}

#[tokio::test]
async fn batch_creation_with_cancellation() {
    let fixture = TreeFixture::new();
    let mut ws = open(&fixture).await;
    let mut prompter = ScriptedPrompter::new([
        Some(workflow::NEW_MODULE_CHOICE),
        Some("Arrays"),
        Some("3"),
        Some("Traversal"),
        None,
    ]);

    let batch = assert_ok!(workflow::add_topics(&mut ws, &mut prompter).await);

    assert!(batch.cancelled);
    assert_eq!(batch.succeeded, 1);
    assert_eq!(batch.failed, 0);
    assert_eq!(fixture.children("modules/001-Arrays"), vec!["001-Traversal"]);
}

#[tokio::test]
async fn adherence_repairs_empty_files() {
    let fixture = TreeFixture::new();
    for role in Role::ALL {
        fixture.file(
            format!("modules/001-Arrays/001-Traversal/{}", role.file_name()),
            "",
        );
    }
    let mut ws = open(&fixture).await;

    let report = assert_ok!(ws.adhere().await);

    assert_eq!(report.regenerated, 5);
    assert_eq!(report.cumulative, 1);
    for role in Role::ALL {
        let text = fixture
            .read(format!("modules/001-Arrays/001-Traversal/{}", role.file_name()))
            .unwrap();
        assert!(text.starts_with("# Traversal"), "{}", role.file_name());
    }
    let cumulative = fixture
        .read(format!("modules/001-Arrays/001-Traversal/{CUMULATIVE_FILE}"))
        .unwrap();
    assert!(cumulative.contains("## Summary"));
}

#[tokio::test]
async fn adherence_brings_messy_tree_to_canonical_form() {
    let fixture = TreeFixture::with_dirs(&[
        "4-data_structures/3-stacks",
        "4-data_structures/7-queues",
        "9-graphs",
    ]);
    fixture.dir("modules/drafts");
    let mut ws = open(&fixture).await;

    let report = assert_ok!(ws.adhere().await);

    assert_eq!(
        fixture.children("modules"),
        vec!["001-Data-Structures", "002-Graphs", "drafts"]
    );
    assert_eq!(
        fixture.children("modules/001-Data-Structures"),
        vec!["001-Stacks", "002-Queues"]
    );
    assert_eq!(report.populated, 2);
    assert!(report.is_clean());
    assert_eq!(ws.index().topic_count("Data-Structures"), Some(2));
}
