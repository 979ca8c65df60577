pub mod format;
pub mod state;
pub mod view;

pub use state::{DashboardEvent, DashboardState, Tab};
pub use view::{render_dashboard, DashboardView, DetailPanel, TabContent};
