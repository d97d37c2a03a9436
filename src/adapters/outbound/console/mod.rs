/// Console adapters for rendering state
mod state_presenter;

pub use state_presenter::ConsolePresenter;
