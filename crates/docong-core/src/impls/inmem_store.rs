//! InMemoryBoardStore - 開発用・デモ用の正本
//!
//! TodoStore / TimerControl / GroupStore をまとめて実装します。
//! 変更後のリストは `todos()` で取り出し、`Board::sync` に渡します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::{
    Assignee, BoardError, GroupId, GroupModifyInput, GroupRecord, TodoId, TodoInput, TodoRecord,
    TodoStatus,
};
use crate::ports::{GroupStore, TimerControl, TodoStore};

#[derive(Default)]
struct Inner {
    todos: Vec<TodoRecord>,
    groups: HashMap<GroupId, GroupRecord>,
    next_seq: i64,
}

impl Inner {
    fn todo_mut(&mut self, id: TodoId) -> Result<&mut TodoRecord, BoardError> {
        self.todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(BoardError::UnknownTodo(id))
    }
}

#[derive(Default)]
pub struct InMemoryBoardStore {
    inner: Mutex<Inner>,
}

impl InMemoryBoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing records; new ids continue after the largest one.
    pub fn with_todos(todos: Vec<TodoRecord>) -> Self {
        let next_seq = todos.iter().map(|t| t.id.get()).max().unwrap_or(0) + 1;
        Self {
            inner: Mutex::new(Inner {
                todos,
                groups: HashMap::new(),
                next_seq,
            }),
        }
    }

    pub async fn insert_group(&self, group: GroupRecord) {
        self.inner.lock().await.groups.insert(group.id, group);
    }

    pub async fn group(&self, id: GroupId) -> Option<GroupRecord> {
        self.inner.lock().await.groups.get(&id).cloned()
    }

    /// Snapshot of the current record list.
    pub async fn todos(&self) -> Vec<TodoRecord> {
        self.inner.lock().await.todos.clone()
    }
}

#[async_trait]
impl TodoStore for InMemoryBoardStore {
    async fn create_todo(&self, input: TodoInput) -> Result<(), BoardError> {
        let mut inner = self.inner.lock().await;
        let id = TodoId::new(inner.next_seq.max(1));
        inner.next_seq = id.get() + 1;
        inner.todos.push(TodoRecord {
            id,
            title: input.title,
            content: input.content,
            status: TodoStatus::Todo,
            predicted_pomo: input.predicted_pomo,
            real_pomo: 0,
            work_type: input.work_type,
            work_importance: input.work_importance,
            work_proficiency: input.work_proficiency,
            assignee: Assignee {
                email: input.user_email,
                name: String::new(),
                image_url: None,
            },
            active: false,
        });
        debug!(%id, "todo created");
        Ok(())
    }

    async fn modify_todo(&self, id: TodoId, input: TodoInput) -> Result<(), BoardError> {
        let mut inner = self.inner.lock().await;
        let todo = inner.todo_mut(id)?;
        todo.title = input.title;
        todo.content = input.content;
        todo.predicted_pomo = input.predicted_pomo;
        todo.work_type = input.work_type;
        todo.work_importance = input.work_importance;
        todo.work_proficiency = input.work_proficiency;
        if todo.assignee.email != input.user_email {
            todo.assignee = Assignee {
                email: input.user_email,
                name: String::new(),
                image_url: None,
            };
        }
        Ok(())
    }

    async fn delete_todo(&self, id: TodoId) -> Result<(), BoardError> {
        let mut inner = self.inner.lock().await;
        let before = inner.todos.len();
        inner.todos.retain(|t| t.id != id);
        if inner.todos.len() == before {
            return Err(BoardError::UnknownTodo(id));
        }
        Ok(())
    }

    async fn modify_todo_status(&self, id: TodoId, status: TodoStatus) -> Result<(), BoardError> {
        let mut inner = self.inner.lock().await;
        inner.todo_mut(id)?.status = status;
        Ok(())
    }
}

#[async_trait]
impl TimerControl for InMemoryBoardStore {
    /// Marks the todo as running. Other todos of the same assignee stop.
    async fn start_todo_timer(&self, todo: &TodoRecord) -> Result<(), BoardError> {
        let mut inner = self.inner.lock().await;
        inner.todo_mut(todo.id)?;
        for t in inner
            .todos
            .iter_mut()
            .filter(|t| t.assignee.email == todo.assignee.email)
        {
            t.active = t.id == todo.id;
        }
        Ok(())
    }
}

#[async_trait]
impl GroupStore for InMemoryBoardStore {
    async fn modify_group(&self, input: GroupModifyInput) -> Result<(), BoardError> {
        let mut inner = self.inner.lock().await;
        let group = inner.groups.get_mut(&input.team_id).ok_or_else(|| {
            BoardError::external("modify group", format!("{} not found", input.team_id))
        })?;
        group.name = input.name;
        Ok(())
    }
}
