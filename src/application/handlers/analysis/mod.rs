//! Bug analysis handlers.
//!
//! Use cases that drive the LLM invoker: full analysis, module
//! identification, test case drafting and assignee suggestion.

mod analyze_bug;
mod generate_test_cases;
mod identify_module;
mod suggest_assignee;

pub use analyze_bug::{AnalyzeBugCommand, AnalyzeBugHandler};
pub use generate_test_cases::{GenerateTestCasesHandler, TEST_GENERATION_FAILED};
pub use identify_module::{IdentifyModuleHandler, UNKNOWN_MODULE};
pub use suggest_assignee::{suggest_assignee, RecentAssignee};
