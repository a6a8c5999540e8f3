//! Numbered module/topic content trees.
//!
//! A content tree lives under `modules/`: each module is a directory named
//! `NNN-Module-Name`, and each topic inside it is a directory `NNN-Topic-Name`
//! holding five numbered markdown files, a quiz and, once the five have
//! content, a cumulative file.
//!
//! [`Workspace`] is the entry point. It owns the module index and exposes
//! scaffolding ([`Workspace::create_topic`]), whole-tree repair
//! ([`Workspace::adhere`]) and renumbering. [`ChangeReactor`] keeps a tree
//! contiguous while it is edited, fed by a [`TreeWatcher`].

pub mod adherence;
pub mod error;
pub mod event;
pub mod fs;
pub mod guard;
pub mod index;
pub mod layout;
pub mod naming;
pub mod prompt;
pub mod reactor;
pub mod renumber;
pub mod scaffold;
pub mod templater;
pub mod watcher;
pub mod workflow;
pub mod workspace;

pub use adherence::AdherenceReport;
pub use error::{FsError, TreeError, TreeResult};
pub use event::TreeEvent;
pub use fs::{DirEntry, LocalFs, MemoryFs, WorkspaceFs};
pub use guard::{Scope, ScopeGuard, ScopeLease, ScopeState};
pub use index::ModuleIndex;
pub use layout::{Role, TopicFile};
pub use naming::NameNormalizer;
pub use prompt::{PromptError, Prompter, ScriptedPrompter};
pub use reactor::{ChangeReactor, Reaction};
pub use renumber::{RenumberEngine, RenumberReport};
pub use scaffold::{CreatedModule, CreatedTopic, TopicOutcome};
pub use templater::{TemplateContext, Templater};
pub use watcher::TreeWatcher;
pub use workflow::BatchOutcome;
pub use workspace::Workspace;
