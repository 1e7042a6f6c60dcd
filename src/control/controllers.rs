//! Controllers for the turtle

use crate::common::types::{Pose, Target, VelocityCommand};
use nalgebra::Vector2;
use std::f64::consts::PI;

/// Distance to the target at or below which the turtle holds still
pub const STOP_THRESHOLD: f64 = 0.5;

/// Proportional gains of the go-to-goal law
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerGains {
    pub linear: f64,
    pub angular: f64,
}

impl Default for ControllerGains {
    fn default() -> Self {
        ControllerGains {
            linear: 2.0,
            angular: 6.0,
        }
    }
}

/// Whether the controller is still driving or holding at the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMode {
    Seeking,
    Arrived,
}

/// Wrap a heading error into [-pi, pi] with a single correction.
///
/// Only valid when both angles that produced `error` already lie in
/// (-pi, pi], so the raw difference is within (-2pi, 2pi].
pub fn wrap_heading_error(error: f64) -> f64 {
    if error > PI {
        error - 2.0 * PI
    } else if error < -PI {
        error + 2.0 * PI
    } else {
        error
    }
}

/// Proportional go-to-goal controller for a differential drive vehicle
#[derive(Debug, Clone)]
pub struct GoToGoalController {
    gains: ControllerGains,
    stop_threshold: f64,
    target: Target,
    pose: Option<Pose>,
}

impl GoToGoalController {
    /// Create a new controller steering toward `target`
    pub fn new(target: Target) -> Self {
        GoToGoalController {
            gains: ControllerGains::default(),
            stop_threshold: STOP_THRESHOLD,
            target,
            pose: None,
        }
    }

    /// Store the most recent pose sample, replacing the previous one
    pub fn update_pose(&mut self, pose: Pose) {
        self.pose = Some(pose);
    }

    pub fn pose(&self) -> Option<Pose> {
        self.pose
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// Distance from the last pose to the target, if a pose is known
    pub fn distance_to_target(&self) -> Option<f64> {
        self.pose.map(|pose| self.offset_to_target(&pose).norm())
    }

    /// Current mode, recomputed from the stored pose
    pub fn mode(&self) -> Option<ControlMode> {
        self.distance_to_target().map(|distance| {
            if distance > self.stop_threshold {
                ControlMode::Seeking
            } else {
                ControlMode::Arrived
            }
        })
    }

    /// Compute the velocity command for the stored pose.
    ///
    /// Returns `None` until the first pose has been received.
    pub fn compute_command(&self) -> Option<VelocityCommand> {
        let pose = self.pose?;
        let offset = self.offset_to_target(&pose);
        let distance = offset.norm();

        if distance > self.stop_threshold {
            let goal_heading = offset.y.atan2(offset.x);
            let heading_error = wrap_heading_error(goal_heading - pose.theta);

            Some(VelocityCommand {
                linear_x: self.gains.linear * distance,
                angular_z: self.gains.angular * heading_error,
            })
        } else {
            Some(VelocityCommand::HOLD)
        }
    }

    fn offset_to_target(&self, pose: &Pose) -> Vector2<f64> {
        Vector2::new(self.target.x - pose.x, self.target.y - pose.y)
    }
}

impl Default for GoToGoalController {
    fn default() -> Self {
        GoToGoalController::new(Target::new(2.0, 6.0))
    }
}
