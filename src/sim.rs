//! Kinematic turtle for running the controller without a ROS graph

use crate::common::types::{Pose, VelocityCommand};
use nalgebra::Vector2;
use std::f64::consts::PI;

/// Spawn coordinate of turtlesim's first turtle
pub const TURTLESIM_SPAWN: f64 = 5.544445;

/// A unicycle-model turtle driven by velocity commands
#[derive(Debug, Clone)]
pub struct SimulatedTurtle {
    pose: Pose,
}

impl SimulatedTurtle {
    pub fn new(pose: Pose) -> Self {
        SimulatedTurtle {
            pose: Pose {
                theta: normalize_angle(pose.theta),
                ..pose
            },
        }
    }

    /// A turtle at the turtlesim spawn point, facing +x
    pub fn spawned() -> Self {
        SimulatedTurtle::new(Pose::new(TURTLESIM_SPAWN, TURTLESIM_SPAWN, 0.0))
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Advance the turtle by `dt` seconds under `command`
    pub fn step(&mut self, command: &VelocityCommand, dt: f64) -> Pose {
        let heading = Vector2::new(self.pose.theta.cos(), self.pose.theta.sin());
        let displacement = heading * command.linear_x * dt;

        self.pose = Pose {
            x: self.pose.x + displacement.x,
            y: self.pose.y + displacement.y,
            theta: normalize_angle(self.pose.theta + command.angular_z * dt),
        };
        self.pose
    }
}

/// Normalize an angle into (-pi, pi]; angles already in range are returned unchanged
pub fn normalize_angle(angle: f64) -> f64 {
    if angle > -PI && angle <= PI {
        return angle;
    }

    let wrapped = angle.sin().atan2(angle.cos());
    if wrapped <= -PI {
        PI
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn straight_line_motion() {
        let mut turtle = SimulatedTurtle::new(Pose::new(1.0, 1.0, FRAC_PI_2));
        let pose = turtle.step(
            &VelocityCommand {
                linear_x: 2.0,
                angular_z: 0.0,
            },
            0.5,
        );

        assert_abs_diff_eq!(pose.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pose.y, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pose.theta, FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn hold_keeps_pose() {
        let mut turtle = SimulatedTurtle::spawned();
        let before = turtle.pose();
        assert_eq!(turtle.step(&VelocityCommand::HOLD, 0.01), before);
    }

    #[test]
    fn heading_stays_normalized() {
        let mut turtle = SimulatedTurtle::new(Pose::new(0.0, 0.0, 3.0));
        let pose = turtle.step(
            &VelocityCommand {
                linear_x: 0.0,
                angular_z: 1.0,
            },
            0.5,
        );

        assert_abs_diff_eq!(pose.theta, 3.5 - 2.0 * PI, epsilon = 1e-12);
    }

    #[test]
    fn normalize_angle_range() {
        assert_eq!(normalize_angle(-PI), PI);
        assert_eq!(normalize_angle(PI), PI);
        assert_abs_diff_eq!(normalize_angle(3.0 * PI), PI, epsilon = 1e-9);
        assert_abs_diff_eq!(normalize_angle(-FRAC_PI_2), -FRAC_PI_2, epsilon = 1e-12);
    }
}
