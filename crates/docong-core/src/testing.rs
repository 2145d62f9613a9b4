//! Fakes and fixtures shared by the unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::domain::{
    Assignee, BoardError, DomainEvent, GroupId, GroupModifyInput, PredictionRequest, TodoId,
    TodoInput, TodoRecord, TodoStatus, UserProfile, WorkImportance, WorkProficiency, WorkType,
};
use crate::ports::{EffortPredictor, EventSink, GroupStore, TimerControl, TodoStore};

pub(crate) fn todo(seq: i64, status: TodoStatus, email: &str) -> TodoRecord {
    TodoRecord {
        id: TodoId::new(seq),
        title: format!("todo {seq}"),
        content: String::new(),
        status,
        predicted_pomo: 2,
        real_pomo: 0,
        work_type: WorkType::Development,
        work_importance: WorkImportance::Medium,
        work_proficiency: WorkProficiency::Intermediate,
        assignee: Assignee {
            email: email.to_string(),
            name: String::new(),
            image_url: None,
        },
        active: false,
    }
}

pub(crate) fn profile(email: &str) -> UserProfile {
    UserProfile::new(email)
}

/// A call received by one of the fake ports.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Create(TodoInput),
    Modify(TodoId, TodoInput),
    Delete(TodoId),
    Status(TodoId, TodoStatus),
    StartTimer(TodoId),
    ModifyGroup(GroupModifyInput),
}

/// Records every call; `fail()` makes the next calls return an error.
#[derive(Default)]
pub(crate) struct FakeStore {
    calls: Mutex<Vec<Call>>,
    failing: AtomicBool,
}

impl FakeStore {
    pub(crate) fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, operation: &'static str, call: Call) -> Result<(), BoardError> {
        self.calls.lock().unwrap().push(call);
        if self.failing.load(Ordering::SeqCst) {
            return Err(BoardError::external(operation, "503 Service Unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl TodoStore for FakeStore {
    async fn create_todo(&self, input: TodoInput) -> Result<(), BoardError> {
        self.record("create todo", Call::Create(input))
    }

    async fn modify_todo(&self, id: TodoId, input: TodoInput) -> Result<(), BoardError> {
        self.record("modify todo", Call::Modify(id, input))
    }

    async fn delete_todo(&self, id: TodoId) -> Result<(), BoardError> {
        self.record("delete todo", Call::Delete(id))
    }

    async fn modify_todo_status(&self, id: TodoId, status: TodoStatus) -> Result<(), BoardError> {
        self.record("status change", Call::Status(id, status))
    }
}

#[async_trait]
impl TimerControl for FakeStore {
    async fn start_todo_timer(&self, todo: &TodoRecord) -> Result<(), BoardError> {
        self.record("start timer", Call::StartTimer(todo.id))
    }
}

#[async_trait]
impl GroupStore for FakeStore {
    async fn modify_group(&self, input: GroupModifyInput) -> Result<(), BoardError> {
        self.record("modify group", Call::ModifyGroup(input))
    }
}

#[derive(Default)]
pub(crate) struct RecordingSink {
    events: Mutex<Vec<DomainEvent>>,
}

impl RecordingSink {
    pub(crate) fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: DomainEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Returns a fixed score and keeps the requests it saw; `fail()` makes it error.
pub(crate) struct FakePredictor {
    score: f64,
    requests: Mutex<Vec<PredictionRequest>>,
    failing: AtomicBool,
}

impl FakePredictor {
    pub(crate) fn new(score: f64) -> Self {
        Self {
            score,
            requests: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    pub(crate) fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub(crate) fn requests(&self) -> Vec<PredictionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl EffortPredictor for FakePredictor {
    async fn predict(&self, request: &PredictionRequest) -> Result<f64, BoardError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.failing.load(Ordering::SeqCst) {
            return Err(BoardError::external("effort prediction", "504 Gateway Timeout"));
        }
        Ok(self.score)
    }
}

pub(crate) const TEAM: GroupId = GroupId::new(1);
