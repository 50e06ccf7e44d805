pub mod drill_repo;
pub mod history_repo;
pub mod template_repo;

pub use drill_repo::DrillRepository;
pub use history_repo::HistoryRepository;
pub use template_repo::TemplateRepository;
