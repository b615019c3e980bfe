//! Locker browser state.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use futures::{FutureExt, StreamExt};

use innings_core::artifact::ResultView;
use innings_core::service;
use innings_db::models::{FlowKind, Roadmap, RoadmapQuery};
use innings_db::{LiveQuery, LocalStore};

use crate::roadmap_cmds::export_payload;

/// Which screen the locker is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Detail,
    ConfirmDelete { id: i64, from_detail: bool },
    Help,
}

/// The roadmap opened in the detail screen.
pub struct OpenRoadmap {
    pub roadmap: Roadmap,
    pub view: ResultView,
    pub selected_phase: usize,
}

pub struct App {
    store: LocalStore,
    live: LiveQuery<Roadmap>,
    pub flow_filter: Option<FlowKind>,
    pub current_view: View,
    pub roadmaps: Vec<Roadmap>,
    pub selected: usize,
    pub open: Option<OpenRoadmap>,
    pub export_dir: PathBuf,
    pub tick_rate: Duration,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

fn query_for(flow: Option<FlowKind>) -> RoadmapQuery {
    match flow {
        Some(flow) => RoadmapQuery::all().with_flow(flow),
        None => RoadmapQuery::all(),
    }
}

impl App {
    pub fn new(store: LocalStore, export_dir: PathBuf) -> Self {
        let live = store.subscribe_roadmaps(query_for(None));
        Self {
            store,
            live,
            flow_filter: None,
            current_view: View::List,
            roadmaps: Vec::new(),
            selected: 0,
            open: None,
            export_dir,
            tick_rate: Duration::from_millis(250),
            should_quit: false,
            status_message: None,
        }
    }

    /// Wait for the next result of the live query and apply it.
    pub async fn wait_for_update(&mut self) -> Result<()> {
        match self.live.next().await {
            Some(result) => {
                self.apply(result?);
                Ok(())
            }
            None => bail!("locker subscription closed"),
        }
    }

    /// Apply every result the live query has ready, without blocking.
    pub fn poll_updates(&mut self) -> Result<()> {
        while let Some(Some(result)) = self.live.next().now_or_never() {
            self.apply(result?);
        }
        Ok(())
    }

    fn apply(&mut self, roadmaps: Vec<Roadmap>) {
        self.roadmaps = roadmaps;
        if self.selected >= self.roadmaps.len() {
            self.selected = self.roadmaps.len().saturating_sub(1);
        }
        // The open roadmap was deleted elsewhere.
        let gone = self
            .open
            .as_ref()
            .is_some_and(|open| !self.roadmaps.iter().any(|r| r.id == open.roadmap.id));
        if gone && self.current_view == View::Detail {
            self.open = None;
            self.current_view = View::List;
            self.status_message = Some("Roadmap no longer exists".to_string());
        }
    }

    pub fn selected_roadmap(&self) -> Option<&Roadmap> {
        self.roadmaps.get(self.selected)
    }

    /// Cycle the list filter: all -> discovery -> pivot -> all.
    pub fn cycle_filter(&mut self) {
        self.flow_filter = match self.flow_filter {
            None => Some(FlowKind::Discovery),
            Some(FlowKind::Discovery) => Some(FlowKind::Pivot),
            Some(FlowKind::Pivot) => None,
        };
        self.live = self.store.subscribe_roadmaps(query_for(self.flow_filter));
        self.selected = 0;
    }

    pub fn filter_label(&self) -> &'static str {
        match self.flow_filter {
            None => "all",
            Some(FlowKind::Discovery) => "discovery",
            Some(FlowKind::Pivot) => "pivot",
        }
    }

    // -- Navigation --

    pub fn navigate_back(&mut self) {
        match self.current_view {
            View::List => self.should_quit = true,
            View::Detail | View::Help => {
                self.open = None;
                self.current_view = View::List;
            }
            View::ConfirmDelete { from_detail, .. } => {
                self.current_view = if from_detail { View::Detail } else { View::List };
            }
        }
    }

    pub fn navigate_enter(&mut self) {
        match self.current_view {
            View::List => {
                if let Some(roadmap) = self.selected_roadmap().cloned() {
                    let view = service::load_into_view(&roadmap);
                    self.open = Some(OpenRoadmap {
                        roadmap,
                        view,
                        selected_phase: 0,
                    });
                    self.current_view = View::Detail;
                }
            }
            View::Detail => self.toggle_selected_phase(),
            _ => {}
        }
    }

    pub fn move_up(&mut self) {
        match self.current_view {
            View::List => self.selected = self.selected.saturating_sub(1),
            View::Detail => {
                if let Some(open) = &mut self.open {
                    open.selected_phase = open.selected_phase.saturating_sub(1);
                }
            }
            _ => {}
        }
    }

    pub fn move_down(&mut self) {
        match self.current_view {
            View::List => {
                if self.selected + 1 < self.roadmaps.len() {
                    self.selected += 1;
                }
            }
            View::Detail => {
                if let Some(open) = &mut self.open {
                    let phases = open.view.view().map_or(0, |v| v.phases.len());
                    if open.selected_phase + 1 < phases {
                        open.selected_phase += 1;
                    }
                }
            }
            _ => {}
        }
    }

    fn toggle_selected_phase(&mut self) {
        if let Some(OpenRoadmap {
            view: ResultView::Rendered(view),
            selected_phase,
            ..
        }) = &mut self.open
        {
            view.toggle_phase(*selected_phase);
        }
    }

    pub fn show_help(&mut self) {
        self.current_view = View::Help;
    }

    // -- Actions --

    fn target_id(&self) -> Option<i64> {
        match self.current_view {
            View::List => self.selected_roadmap().map(|r| r.id),
            View::Detail => self.open.as_ref().map(|o| o.roadmap.id),
            _ => None,
        }
    }

    fn target_content(&self) -> Option<&str> {
        match self.current_view {
            View::List => self.selected_roadmap().map(|r| r.full_content.as_str()),
            View::Detail => self.open.as_ref().map(|o| o.roadmap.full_content.as_str()),
            _ => None,
        }
    }

    /// Ask for confirmation before deleting the selected roadmap.
    pub fn request_delete(&mut self) {
        if let Some(id) = self.target_id() {
            self.current_view = View::ConfirmDelete {
                id,
                from_detail: self.current_view == View::Detail,
            };
        }
    }

    pub async fn confirm_delete(&mut self) -> Result<()> {
        let View::ConfirmDelete { id, .. } = self.current_view else {
            return Ok(());
        };
        self.store.delete_roadmap(id).await?;
        self.open = None;
        self.current_view = View::List;
        self.status_message = Some(format!("Roadmap {id} deleted"));
        Ok(())
    }

    /// Export the selected roadmap as Markdown into the export directory.
    pub fn export_selected(&mut self) -> Result<()> {
        let Some(content) = self.target_content() else {
            return Ok(());
        };
        let path = export_payload(content, Some(self.export_dir.as_path()))?;
        self.status_message = Some(format!("Exported to {}", path.display()));
        Ok(())
    }

    /// Title of the roadmap awaiting delete confirmation.
    pub fn pending_delete_title(&self) -> Option<&str> {
        let View::ConfirmDelete { id, .. } = self.current_view else {
            return None;
        };
        self.roadmaps
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.title.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use innings_test_utils::{create_test_store, sample_roadmap};

    const PHASED: &str = r#"{"title":"Rise","current_status_analysis":"ok",
        "roadmap_steps":[{"phase":"A","duration":"1m","actions":["a"]},
                         {"phase":"B","duration":"2m","actions":["b"]}],
        "key_institutions":[],"financial_aid_tips":[]}"#;

    async fn loaded_app(store: &LocalStore, export_dir: PathBuf) -> App {
        let mut app = App::new(store.clone(), export_dir);
        app.wait_for_update().await.unwrap();
        app
    }

    #[tokio::test]
    async fn list_follows_store_changes() {
        let t = create_test_store().await;
        let dir = tempfile::tempdir().unwrap();
        let mut app = loaded_app(&t.store, dir.path().to_path_buf()).await;
        assert!(app.roadmaps.is_empty());

        t.store
            .add_roadmap(&sample_roadmap(FlowKind::Pivot, "Hockey", 0))
            .await
            .unwrap();
        app.wait_for_update().await.unwrap();
        assert_eq!(app.roadmaps.len(), 1);
        assert_eq!(app.roadmaps[0].sport, "Hockey");
    }

    #[tokio::test]
    async fn filter_resubscribes() {
        let t = create_test_store().await;
        t.store
            .add_roadmap(&sample_roadmap(FlowKind::Discovery, "Cricket", 0))
            .await
            .unwrap();
        t.store
            .add_roadmap(&sample_roadmap(FlowKind::Pivot, "Hockey", 1))
            .await
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let mut app = loaded_app(&t.store, dir.path().to_path_buf()).await;
        assert_eq!(app.roadmaps.len(), 2);

        app.cycle_filter();
        app.wait_for_update().await.unwrap();
        assert_eq!(app.filter_label(), "discovery");
        assert_eq!(app.roadmaps.len(), 1);
        assert_eq!(app.roadmaps[0].sport, "Cricket");

        app.cycle_filter();
        app.cycle_filter();
        app.wait_for_update().await.unwrap();
        assert_eq!(app.filter_label(), "all");
        assert_eq!(app.roadmaps.len(), 2);
    }

    #[tokio::test]
    async fn detail_toggles_phases() {
        let t = create_test_store().await;
        let mut record = sample_roadmap(FlowKind::Discovery, "Cricket", 0);
        record.full_content = PHASED.to_string();
        t.store.add_roadmap(&record).await.unwrap();
        let dir = tempfile::tempdir().unwrap();
        let mut app = loaded_app(&t.store, dir.path().to_path_buf()).await;

        app.navigate_enter();
        assert_eq!(app.current_view, View::Detail);
        app.move_down();
        app.navigate_enter();

        let open = app.open.as_ref().unwrap();
        let view = open.view.view().unwrap();
        assert_eq!(open.selected_phase, 1);
        assert!(view.phases.iter().all(|p| p.expanded));

        app.navigate_back();
        assert_eq!(app.current_view, View::List);
        assert!(app.open.is_none());
    }

    #[tokio::test]
    async fn delete_needs_confirmation() {
        let t = create_test_store().await;
        let id = t
            .store
            .add_roadmap(&sample_roadmap(FlowKind::Pivot, "Hockey", 0))
            .await
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let mut app = loaded_app(&t.store, dir.path().to_path_buf()).await;

        app.request_delete();
        assert_eq!(
            app.current_view,
            View::ConfirmDelete {
                id,
                from_detail: false
            }
        );
        assert_eq!(app.pending_delete_title(), Some("Hockey plan"));

        app.navigate_back();
        assert_eq!(app.current_view, View::List);
        assert!(t.store.get_roadmap(id).await.unwrap().is_some());

        app.request_delete();
        app.confirm_delete().await.unwrap();
        app.wait_for_update().await.unwrap();
        assert!(app.roadmaps.is_empty());
        assert!(t.store.get_roadmap(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn export_writes_markdown() {
        let t = create_test_store().await;
        t.store
            .add_roadmap(&sample_roadmap(FlowKind::Discovery, "Cricket", 0))
            .await
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let mut app = loaded_app(&t.store, dir.path().to_path_buf()).await;

        app.export_selected().unwrap();
        assert!(dir.path().join("plan.md").exists());
        assert!(app.status_message.as_deref().unwrap().starts_with("Exported to"));
    }

    #[test]
    fn query_for_filter() {
        assert_eq!(query_for(None), RoadmapQuery::all());
        assert_eq!(
            query_for(Some(FlowKind::Pivot)).flow,
            Some(FlowKind::Pivot)
        );
    }
}
