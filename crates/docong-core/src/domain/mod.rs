//! Domain model (ids, records, status, projection, policy, errors, events).

pub mod board;
pub mod errors;
pub mod estimate;
pub mod events;
pub mod group;
pub mod ids;
pub mod policy;
pub mod session;
pub mod state;
pub mod todo;

pub use board::BoardProjection;
pub use errors::{BoardError, CardAction, ErrorKind};
pub use estimate::{PredictionRequest, TimeStatus, effort_from_score};
pub use events::DomainEvent;
pub use group::{GroupModifyInput, GroupRecord, Member, TrackerCredentials};
pub use ids::{GroupId, OpId, TodoId};
pub use session::{Session, UserProfile};
pub use state::TodoStatus;
pub use todo::{Assignee, TodoInput, TodoRecord, WorkImportance, WorkProficiency, WorkType};
