// src/input/command.rs
use anyhow::Result;

use crate::analysis::PickedFile;
use crate::controller::Controller;
use crate::render::RenderTargets;
use crate::state::INVALID_FILE_ALERT;

pub trait Command {
    fn execute(self: Box<Self>, controller: &mut Controller, view: &mut dyn RenderTargets) -> Result<()>;
}

pub struct UploadFileCommand(pub PickedFile);
impl Command for UploadFileCommand {
    fn execute(self: Box<Self>, controller: &mut Controller, _view: &mut dyn RenderTargets) -> Result<()> {
        controller.upload(self.0);
        Ok(())
    }
}

pub struct RejectFileCommand;
impl Command for RejectFileCommand {
    fn execute(self: Box<Self>, controller: &mut Controller, _view: &mut dyn RenderTargets) -> Result<()> {
        controller.state.raise_alert(INVALID_FILE_ALERT);
        Ok(())
    }
}

/// Re-runs the analysis for the dates currently typed into the filter inputs.
pub struct ApplyFiltersCommand;
impl Command for ApplyFiltersCommand {
    fn execute(self: Box<Self>, controller: &mut Controller, view: &mut dyn RenderTargets) -> Result<()> {
        let range = view.filter_range();
        controller.apply_filters(range);
        Ok(())
    }
}

pub struct DismissAlertCommand;
impl Command for DismissAlertCommand {
    fn execute(self: Box<Self>, controller: &mut Controller, _view: &mut dyn RenderTargets) -> Result<()> {
        controller.state.alert = None;
        Ok(())
    }
}
