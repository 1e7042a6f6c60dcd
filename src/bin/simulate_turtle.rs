use anyhow::Result;
use env_logger::Env;
use log::info;
use std::cell::Cell;
use turtle_controller::sim::SimulatedTurtle;
use turtle_controller::{CommandSink, ControlMode, ControlStack, ControllerConfig, VelocityCommand};

/// Upper bound on simulated ticks before giving up
const MAX_STEPS: usize = 5_000;

/// Holds the last command so the simulation can apply it
#[derive(Default)]
struct LatchedCommand(Cell<VelocityCommand>);

impl CommandSink for LatchedCommand {
    fn publish(&self, command: &VelocityCommand) -> turtle_controller::Result<()> {
        self.0.set(*command);
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = ControllerConfig::default();
    let dt = config.loop_frequency();

    let mut stack = ControlStack::default();
    let mut turtle = SimulatedTurtle::spawned();
    let sink = LatchedCommand::default();

    info!(
        "Simulating turtle from {:?} toward {:?} with dt={}",
        turtle.pose(),
        stack.controller().target(),
        dt
    );

    for step in 0..MAX_STEPS {
        stack.on_pose(turtle.pose());
        stack.tick(&sink)?;

        if stack.mode() == Some(ControlMode::Arrived) {
            println!("Arrived after {} ticks at {:?}", step, turtle.pose());
            return Ok(());
        }

        let command = sink.0.get();
        let pose = turtle.step(&command, dt);
        if step % 10 == 0 {
            println!(
                "t={:.2}s x={:.3} y={:.3} theta={:.3} linear={:.3} angular={:.3}",
                step as f64 * dt,
                pose.x,
                pose.y,
                pose.theta,
                command.linear_x,
                command.angular_z
            );
        }
    }

    anyhow::bail!("turtle did not arrive within {} ticks", MAX_STEPS)
}
