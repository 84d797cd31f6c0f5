//! Navigation and view switching utilities.
//!
//! There is one view per emulated service, in [`Service::all`] order.

use emucon_core::Service;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct View(pub Service);

impl Default for View {
    fn default() -> Self {
        View(Service::ApiGateway)
    }
}

impl View {
    pub fn service(&self) -> Service {
        self.0
    }

    pub fn title(&self) -> &'static str {
        self.0.title()
    }

    pub fn all() -> Vec<View> {
        Service::all().iter().copied().map(View).collect()
    }

    pub fn index(&self) -> usize {
        Service::all()
            .iter()
            .position(|s| *s == self.0)
            .unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<View> {
        Service::all().get(index).copied().map(View)
    }

    pub fn next(&self) -> View {
        let all = Service::all();
        let next = (self.index() + 1) % all.len();
        View(all[next])
    }

    pub fn previous(&self) -> View {
        let all = Service::all();
        let idx = self.index();
        let prev = if idx == 0 { all.len() - 1 } else { idx - 1 };
        View(all[prev])
    }
}
