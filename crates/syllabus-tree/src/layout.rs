//! Fixed names of the content tree.

use std::fmt;

use syllabus_common_config::types::TemplateSet;

/// Directory under the workspace root holding all modules.
pub const MODULES_DIR: &str = "modules";
/// Quiz file written into every topic.
pub const QUIZ_FILE: &str = "Quiz.gift";
/// Aggregate of the five content files, written once all of them have content.
pub const CUMULATIVE_FILE: &str = "Cumulative.md";

/// The five content files of a topic, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Prerequisites,
    Description,
    RealWorldApplication,
    Implementation,
    Summary,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Prerequisites,
        Role::Description,
        Role::RealWorldApplication,
        Role::Implementation,
        Role::Summary,
    ];

    /// Three-digit role id, `001` to `005`.
    pub fn id(&self) -> &'static str {
        match self {
            Role::Prerequisites => "001",
            Role::Description => "002",
            Role::RealWorldApplication => "003",
            Role::Implementation => "004",
            Role::Summary => "005",
        }
    }

    /// Zero-based position in [`Role::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Role::Prerequisites => 0,
            Role::Description => 1,
            Role::RealWorldApplication => 2,
            Role::Implementation => 3,
            Role::Summary => 4,
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Role::Prerequisites => "001-Prerequisites-and-Learning-Objectives.md",
            Role::Description => "002-Description.md",
            Role::RealWorldApplication => "003-Real-World-Application.md",
            Role::Implementation => "004-Implementation.md",
            Role::Summary => "005-Summary.md",
        }
    }

    /// Placeholder the cumulative template uses for this file's content.
    pub fn content_token(&self) -> String {
        format!("{}Content", self.id())
    }

    fn template<'a>(&self, templates: &'a TemplateSet) -> &'a str {
        match self {
            Role::Prerequisites => &templates.prerequisites,
            Role::Description => &templates.description,
            Role::RealWorldApplication => &templates.real_world_application,
            Role::Implementation => &templates.implementation,
            Role::Summary => &templates.summary,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Every file a topic can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopicFile {
    Content(Role),
    Quiz,
    Cumulative,
}

impl TopicFile {
    /// Files written when a topic is scaffolded.
    pub fn scaffolded() -> impl Iterator<Item = TopicFile> {
        Role::ALL
            .into_iter()
            .map(TopicFile::Content)
            .chain(std::iter::once(TopicFile::Quiz))
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            TopicFile::Content(role) => role.file_name(),
            TopicFile::Quiz => QUIZ_FILE,
            TopicFile::Cumulative => CUMULATIVE_FILE,
        }
    }

    /// Template text for this file.
    pub fn template<'a>(&self, templates: &'a TemplateSet) -> &'a str {
        match self {
            TopicFile::Content(role) => role.template(templates),
            TopicFile::Quiz => &templates.quiz,
            TopicFile::Cumulative => &templates.cumulative,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_are_ordered() {
        for (i, role) in Role::ALL.iter().enumerate() {
            assert_eq!(role.index(), i);
            assert_eq!(role.id(), format!("{:03}", i + 1));
            assert!(role.file_name().starts_with(role.id()));
        }
    }

    #[test]
    fn test_scaffolded_files() {
        let names: Vec<_> = TopicFile::scaffolded().map(|f| f.file_name()).collect();
        assert_eq!(
            names,
            vec![
                "001-Prerequisites-and-Learning-Objectives.md",
                "002-Description.md",
                "003-Real-World-Application.md",
                "004-Implementation.md",
                "005-Summary.md",
                "Quiz.gift",
            ]
        );
    }

    #[test]
    fn test_templates_by_file() {
        let templates = TemplateSet::default();
        assert_eq!(
            TopicFile::Content(Role::Summary).template(&templates),
            templates.summary
        );
        assert_eq!(TopicFile::Quiz.template(&templates), templates.quiz);
        assert_eq!(
            TopicFile::Cumulative.template(&templates),
            templates.cumulative
        );
    }

    #[test]
    fn test_content_token() {
        assert_eq!(Role::Implementation.content_token(), "004Content");
    }
}
