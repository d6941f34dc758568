// Closed-loop highway planning simulation.
//
// A synthetic circular track with randomly seeded constant-velocity
// traffic; the planner runs one cycle per control tick batch while the
// simulated ego vehicle consumes the head of each emitted trajectory.

use plotlib::page::Page;
use plotlib::repr::Plot;
use plotlib::style::LineStyle;
use plotlib::view::ContinuousView;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

use highway_planner::behavior::lane::{lane_center, LANE_COUNT};
use highway_planner::trajectory::TIME_STEP;
use highway_planner::utils::{colors, PathStyle, PointStyle, Visualizer};
use highway_planner::{
    EgoPose, FrenetPoint, HighwayMap, HighwayPlanner, Point2D, Telemetry, TrafficObservation,
    Trajectory,
};

const TRACK_RADIUS: f64 = 300.0; // [m]
const TRACK_WAYPOINTS: usize = 72;
const N_TRAFFIC: usize = 12;
const N_CYCLES: usize = 400;
const POINTS_PER_CYCLE: usize = 3; // trajectory points the vehicle consumes per cycle

/// One simulated traffic vehicle holding its lane at constant speed
struct SimVehicle {
    s: f64,
    d: f64,
    speed: f64, // [m/s]
}

impl SimVehicle {
    fn observe(&self, map: &HighwayMap) -> TrafficObservation {
        let p1 = map.to_cartesian(self.s, self.d);
        let p2 = map.to_cartesian(self.s + 1.0, self.d);
        let heading = (p2.y - p1.y).atan2(p2.x - p1.x);
        TrafficObservation::new(
            self.speed * heading.cos(),
            self.speed * heading.sin(),
            self.s,
            self.d,
        )
    }

    fn advance(&mut self, dt: f64, max_s: f64) {
        self.s = (self.s + self.speed * dt).rem_euclid(max_s);
    }
}

fn circular_map(radius: f64, n: usize) -> HighwayMap {
    let mut x = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    let mut s = Vec::with_capacity(n);
    let mut dx = Vec::with_capacity(n);
    let mut dy = Vec::with_capacity(n);
    for i in 0..n {
        let theta = 2.0 * PI * i as f64 / n as f64;
        x.push(radius * theta.cos());
        y.push(radius * theta.sin());
        s.push(radius * theta);
        // Travel is counter-clockwise, so positive d points outward
        dx.push(theta.cos());
        dy.push(theta.sin());
    }
    HighwayMap::from_waypoints(x, y, s, dx, dy, 2.0 * PI * radius).unwrap()
}

fn seed_traffic(max_s: f64) -> Vec<SimVehicle> {
    let mut rng = rand::thread_rng();
    let speed_distr: Normal<f64> = Normal::new(17.0, 2.5).unwrap(); // [m/s]
    (0..N_TRAFFIC)
        .map(|_| {
            let lane = rng.gen_range(0..LANE_COUNT);
            SimVehicle {
                s: rng.gen_range(0.0..max_s),
                d: lane_center(lane),
                speed: speed_distr.sample(&mut rng).max(8.0),
            }
        })
        .collect()
}

fn bearing(from: Point2D, to: Point2D) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

fn main() {
    println!("Highway planning simulation start!!");

    let map = circular_map(TRACK_RADIUS, TRACK_WAYPOINTS);
    let mut traffic = seed_traffic(map.max_s());
    let mut planner = HighwayPlanner::new(map.clone());

    // Ego starts at rest at the lane 1 center
    let start_s = 50.0;
    let start = map.to_cartesian(start_s, lane_center(1));
    let start_yaw = bearing(start, map.to_cartesian(start_s + 1.0, lane_center(1)));
    let mut ego = EgoPose::new(start.x, start.y, start_s, lane_center(1), start_yaw.to_degrees(), 0.0);

    let mut previous = Trajectory::new();
    let mut end_path = FrenetPoint::new(0.0, 0.0);
    let mut driven: Vec<(f64, f64)> = vec![(ego.x, ego.y)];
    let mut speed_profile: Vec<(f64, f64)> = vec![(0.0, 0.0)];
    let mut last_plan = Trajectory::new();
    let mut lane = planner.state().lane;

    for cycle in 0..N_CYCLES {
        let observations: Vec<TrafficObservation> =
            traffic.iter().map(|v| v.observe(&map)).collect();
        let telemetry = Telemetry {
            ego,
            previous_path: previous.clone(),
            end_path,
            traffic: observations,
        };

        let plan = planner.plan_cycle(&telemetry);

        if planner.state().lane != lane {
            println!(
                "cycle {}: lane change {} -> {}",
                cycle,
                lane,
                planner.state().lane
            );
            lane = planner.state().lane;
        }

        // The vehicle executes the head of the plan before the next cycle
        let executed = POINTS_PER_CYCLE.min(plan.len());
        for p in &plan.points[..executed] {
            driven.push((p.x, p.y));
        }
        let pos = plan.points[executed - 1];
        let prev_pos = if executed >= 2 {
            plan.points[executed - 2]
        } else {
            ego.position()
        };
        let yaw = bearing(prev_pos, pos);
        let frenet = map.to_frenet(pos.x, pos.y, yaw);
        ego = EgoPose::new(
            pos.x,
            pos.y,
            frenet.s,
            frenet.d,
            yaw.to_degrees(),
            planner.state().target_speed,
        );

        previous = Trajectory::from_points(plan.points[executed..].to_vec());
        let tail_end = previous.points[previous.len() - 1];
        let tail_yaw = bearing(previous.points[previous.len() - 2], tail_end);
        end_path = map.to_frenet(tail_end.x, tail_end.y, tail_yaw);

        let elapsed = executed as f64 * TIME_STEP;
        for v in &mut traffic {
            v.advance(elapsed, map.max_s());
        }

        speed_profile.push(((cycle + 1) as f64, planner.state().target_speed));
        last_plan = plan;

        if (cycle + 1) % 100 == 0 {
            println!(
                "cycle {}: s = {:.1} m, lane {}, target speed {:.1} mph",
                cycle + 1,
                ego.s,
                planner.state().lane,
                planner.state().target_speed
            );
        }
    }

    std::fs::create_dir_all("img").unwrap_or_default();

    // Final road scene
    let mut vis = Visualizer::new("Highway Planning Simulation");
    vis.plot_road(&map);
    vis.plot_trajectory(
        &Trajectory::from_points(driven.iter().map(|&(x, y)| Point2D::new(x, y)).collect()),
        &PathStyle::new("#35C788", "Driven path"),
    );
    vis.plot_trajectory(&last_plan, &PathStyle::new(colors::TRAJECTORY, "Current plan"));
    let traffic_positions: Vec<Point2D> = traffic
        .iter()
        .map(|v| map.to_cartesian(v.s, v.d))
        .collect();
    vis.plot_vehicles(
        &traffic_positions,
        &PointStyle::new(colors::TRAFFIC, "Traffic").with_symbol('S'),
    );
    vis.plot_ego(ego.position());
    match vis.save_png("img/highway_simulation_result.png", 800, 800) {
        Ok(()) => println!("Scene saved to img/highway_simulation_result.png"),
        Err(e) => println!("Failed to save scene: {}", e),
    }

    // Target speed profile
    let profile: Plot = Plot::new(speed_profile).line_style(LineStyle::new().colour("#DD3355"));
    let view = ContinuousView::new()
        .add(profile)
        .x_range(0.0, N_CYCLES as f64)
        .y_range(-5.0, 55.0)
        .x_label("cycle")
        .y_label("target speed [mph]");
    Page::single(&view)
        .save("img/highway_target_speed.svg")
        .unwrap();
    println!("Speed profile saved to img/highway_target_speed.svg");

    println!("Highway planning simulation finish!!");
}
