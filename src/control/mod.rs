//! Control module for the turtle
pub mod control_loop;
pub mod controllers;

use self::controllers::{ControlMode, GoToGoalController};
use crate::common::types::{Pose, Target, VelocityCommand};
use crate::error::Result;
use log::{debug, info};

/// Destination for computed velocity commands
#[cfg_attr(test, mockall::automock)]
pub trait CommandSink {
    /// Emit one velocity command
    fn publish(&self, command: &VelocityCommand) -> Result<()>;
}

/// Control stack for the turtle
pub struct ControlStack {
    controller: GoToGoalController,
    last_mode: Option<ControlMode>,
}

impl ControlStack {
    /// Create a new control stack steering toward `target`
    pub fn new(target: Target) -> Self {
        ControlStack {
            controller: GoToGoalController::new(target),
            last_mode: None,
        }
    }

    /// Handle an incoming pose sample
    pub fn on_pose(&mut self, pose: Pose) {
        self.controller.update_pose(pose);
    }

    pub fn mode(&self) -> Option<ControlMode> {
        self.controller.mode()
    }

    pub fn controller(&self) -> &GoToGoalController {
        &self.controller
    }

    /// Run one control tick.
    ///
    /// Publishes at most one command to `sink`. Nothing is published until
    /// a pose has been received.
    pub fn tick<S: CommandSink + ?Sized>(&mut self, sink: &S) -> Result<Option<VelocityCommand>> {
        let command = match self.controller.compute_command() {
            Some(command) => command,
            None => return Ok(None),
        };

        let mode = self.controller.mode();
        if mode != self.last_mode {
            match mode {
                Some(ControlMode::Arrived) => info!(
                    "Arrived within {:.2} of target {:?}",
                    controllers::STOP_THRESHOLD,
                    self.controller.target()
                ),
                Some(ControlMode::Seeking) => {
                    info!("Seeking target {:?}", self.controller.target())
                }
                None => {}
            }
            self.last_mode = mode;
        }

        sink.publish(&command)?;
        debug!(
            "Published velocity: linear={:.3}, angular={:.3}",
            command.linear_x, command.angular_z
        );

        Ok(Some(command))
    }
}

impl Default for ControlStack {
    fn default() -> Self {
        ControlStack {
            controller: GoToGoalController::default(),
            last_mode: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ControllerError;
    use mockall::predicate::eq;

    #[test]
    fn tick_without_pose_publishes_nothing() {
        let mut sink = MockCommandSink::new();
        sink.expect_publish().never();

        let mut stack = ControlStack::default();
        assert_eq!(stack.tick(&sink).unwrap(), None);
    }

    #[test]
    fn tick_publishes_computed_command_once() {
        let mut stack = ControlStack::default();
        stack.on_pose(Pose::new(1.9, 5.9, 0.0));

        let mut sink = MockCommandSink::new();
        sink.expect_publish()
            .with(eq(VelocityCommand::HOLD))
            .times(1)
            .returning(|_| Ok(()));

        assert_eq!(stack.tick(&sink).unwrap(), Some(VelocityCommand::HOLD));
        assert_eq!(stack.mode(), Some(ControlMode::Arrived));
    }

    #[test]
    fn every_tick_publishes_while_pose_known() {
        let mut stack = ControlStack::default();
        stack.on_pose(Pose::new(0.0, 0.0, 0.0));

        let mut sink = MockCommandSink::new();
        sink.expect_publish().times(3).returning(|_| Ok(()));

        let first = stack.tick(&sink).unwrap();
        assert_eq!(stack.tick(&sink).unwrap(), first);
        assert_eq!(stack.tick(&sink).unwrap(), first);
        assert_eq!(stack.mode(), Some(ControlMode::Seeking));
    }

    #[test]
    fn publish_failure_is_returned() {
        let mut stack = ControlStack::default();
        stack.on_pose(Pose::new(0.0, 0.0, 0.0));

        let mut sink = MockCommandSink::new();
        sink.expect_publish()
            .times(1)
            .returning(|_| Err(ControllerError::Publish("publisher gone".to_string())));

        assert_eq!(
            stack.tick(&sink),
            Err(ControllerError::Publish("publisher gone".to_string()))
        );
    }
}
