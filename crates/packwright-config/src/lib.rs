pub mod assemble;
pub mod declarations;
pub mod dev;
pub mod discovery;
pub mod error;
pub mod mode;
pub mod output;
pub mod plugins;
pub mod resolve;
pub mod rules;

// Re-export main types
pub use assemble::{assemble, project_root, PipelineConfig};
pub use declarations::{AliasDecl, Declarations, OutputDecl};
pub use dev::DevServerOptions;
pub use error::*;
pub use mode::Mode;
pub use output::{plan, FingerprintPolicy, NamingRules, OutputPlan, CONTENT_HASH};
pub use plugins::{compose, Applicability, PluginSpec, Position};
pub use resolve::{
    resolve, AliasEntry, AliasTable, AnyCandidate, CandidateProbe, DeclaredCandidates, FsProbe,
    SearchRoots,
};
pub use rules::{
    rules_for, stages_for, ContentKind, Matcher, RuleDecl, Stage, StageDecl, TransformRule,
};

// Re-export discovery
pub use discovery::{load_file, ConfigDiscovery, CONFIG_FILE_NAME};
