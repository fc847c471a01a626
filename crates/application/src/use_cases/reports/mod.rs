mod list_active_actions;
mod submit_field_report;

pub use list_active_actions::ListActiveActionsUseCase;
pub use submit_field_report::SubmitFieldReportUseCase;
