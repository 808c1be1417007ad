pub mod dialogs;
pub mod project_list;
pub mod project_view;
pub mod theme;
pub mod toolbar;
