//! Events - ホストの状態ストアへ送る更新依頼
//!
//! board やフォームは共有状態を直接書き換えません。
//! 代わりに `EventSink::emit` でこれらのイベントを送ります。

use super::group::TrackerCredentials;
use super::ids::GroupId;
use super::todo::TodoRecord;

/// DomainEvent はホスト側で反映される共有状態の変更
#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    /// Replace the shared timer selection (`None` clears it).
    TimerSelectionChanged(Option<TodoRecord>),

    /// Save tracker credentials for a team.
    TrackerSettingsSubmitted {
        team_id: GroupId,
        settings: TrackerCredentials,
    },
}

impl DomainEvent {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            DomainEvent::TimerSelectionChanged(_) => "timer_selection_changed",
            DomainEvent::TrackerSettingsSubmitted { .. } => "tracker_settings_submitted",
        }
    }
}
