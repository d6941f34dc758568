//! Per-cycle planning orchestration
//!
//! `HighwayPlanner` owns the loaded map and the mutable planner state for
//! exactly one ego vehicle, and runs one full decision-and-trajectory pass
//! per telemetry snapshot. Cycles are synchronous and never overlap; run
//! one `HighwayPlanner` per vehicle/session. Transport framing and
//! telemetry decoding stay outside this crate.

use crate::behavior::{BehaviorConfig, BehaviorPlanner, PlannerState, TrafficVehicle};
use crate::common::{Telemetry, Trajectory};
use crate::map::HighwayMap;
use crate::trajectory::{TrajectoryGenerator, TIME_STEP};

/// Decision-and-trajectory core for one ego vehicle
#[derive(Debug, Clone)]
pub struct HighwayPlanner {
    map: HighwayMap,
    behavior: BehaviorPlanner,
    generator: TrajectoryGenerator,
    state: PlannerState,
}

impl HighwayPlanner {
    pub fn new(map: HighwayMap) -> Self {
        Self::with_config(map, BehaviorConfig::default())
    }

    pub fn with_config(map: HighwayMap, config: BehaviorConfig) -> Self {
        HighwayPlanner {
            map,
            behavior: BehaviorPlanner::with_config(config),
            generator: TrajectoryGenerator::new(),
            state: PlannerState::new(),
        }
    }

    pub fn state(&self) -> &PlannerState {
        &self.state
    }

    pub fn map(&self) -> &HighwayMap {
        &self.map
    }

    /// Run one planning cycle and emit the 50-point trajectory.
    pub fn plan_cycle(&mut self, telemetry: &Telemetry) -> Trajectory {
        let unconsumed = telemetry.previous_path.len();

        // Plan relative to where the vehicle will be once the committed
        // tail is consumed, not where it is right now
        let mut ego = telemetry.ego;
        if unconsumed > 0 {
            ego.s = telemetry.end_path.s;
        }

        let traffic: Vec<TrafficVehicle> = telemetry
            .traffic
            .iter()
            .map(|obs| TrafficVehicle::from_observation(obs, unconsumed, TIME_STEP))
            .collect();

        self.behavior.plan(&mut self.state, ego.s, &traffic);

        self.generator.generate(
            &self.map,
            &ego,
            &telemetry.previous_path,
            self.state.lane,
            self.state.target_speed,
        )
    }
}
