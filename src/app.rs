use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui;

use crate::data::model::Record;
use crate::data::source::{DatasetSource, FetchError};
use crate::state::{AppState, Screen};
use crate::ui::{details, map, panels};

type FetchResult = Result<Vec<Record>, FetchError>;

// ---------------------------------------------------------------------------
// Background fetch
// ---------------------------------------------------------------------------

/// Run `source.fetch()` on a worker thread. `on_done` fires after the result
/// is sent, so the UI can wake up.
pub fn spawn_fetch(
    source: Box<dyn DatasetSource>,
    on_done: impl FnOnce() + Send + 'static,
) -> Receiver<FetchResult> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        log::info!("Fetching dataset from {}", source.describe());
        // The receiver is gone only if the window was closed first.
        let _ = tx.send(source.fetch());
        on_done();
    });
    rx
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RidershipApp {
    pub state: AppState,
    pending: Option<Receiver<FetchResult>>,
}

impl RidershipApp {
    pub fn new(ctx: &egui::Context, source: Box<dyn DatasetSource>) -> Self {
        let ctx = ctx.clone();
        let pending = spawn_fetch(source, move || ctx.request_repaint());
        Self {
            state: AppState::default(),
            pending: Some(pending),
        }
    }

    /// Hand a finished fetch to the state, if one has arrived.
    fn poll_fetch(&mut self) {
        let Some(rx) = &self.pending else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(records)) => {
                self.state.set_dataset(records);
                self.pending = None;
            }
            Ok(Err(e)) => {
                self.state.set_fetch_error(&e);
                self.pending = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.state.status_message = Some("Error: dataset fetch aborted".to_string());
                self.state.loading = false;
                self.pending = None;
            }
        }
    }
}

impl eframe::App for RidershipApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_fetch();

        // ---- Top panel: title, counts, errors ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        match self.state.screen {
            Screen::Home => {
                // ---- Left side panel: filters ----
                egui::SidePanel::left("filter_panel")
                    .default_width(240.0)
                    .resizable(true)
                    .show(ctx, |ui| {
                        panels::side_panel(ui, &mut self.state);
                    });

                // ---- Central panel: record list ----
                egui::CentralPanel::default().show(ctx, |ui| {
                    panels::record_list(ui, &mut self.state);
                });
            }
            Screen::Details(index) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    details::details_screen(ui, &mut self.state, index);
                });
            }
            Screen::Map => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    map::map_screen(ui, &mut self.state);
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::FieldValue;

    struct Fixed(Option<Vec<Record>>);

    impl DatasetSource for Fixed {
        fn describe(&self) -> String {
            "fixed".into()
        }

        fn fetch(&self) -> Result<Vec<Record>, FetchError> {
            self.0.clone().ok_or(FetchError::MissingRecords)
        }
    }

    #[test]
    fn spawned_fetch_delivers_result_and_notifies() {
        let (done_tx, done_rx) = mpsc::channel();
        let record = Record::new(Some(FieldValue::Integer(2020)), None, None);
        let rx = spawn_fetch(Box::new(Fixed(Some(vec![record.clone()]))), move || {
            done_tx.send(()).unwrap();
        });
        assert_eq!(rx.recv().unwrap().unwrap(), vec![record]);
        done_rx.recv().unwrap();
    }

    #[test]
    fn spawned_fetch_delivers_errors() {
        let rx = spawn_fetch(Box::new(Fixed(None)), || {});
        assert!(matches!(rx.recv().unwrap(), Err(FetchError::MissingRecords)));
    }

    #[test]
    fn poll_moves_result_into_state() {
        let (tx, rx) = mpsc::channel();
        let mut app = RidershipApp {
            state: AppState::default(),
            pending: Some(rx),
        };
        app.poll_fetch();
        assert!(app.state.loading);

        tx.send(Ok(vec![Record::default()])).unwrap();
        app.poll_fetch();
        assert!(!app.state.loading);
        assert!(app.pending.is_none());
        assert_eq!(app.state.engine.dataset().len(), 1);
    }
}
