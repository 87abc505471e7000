use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use amazed::maze::generate::{GenerateOptions, generate_maze_with};
use amazed::maze::{AdjacencyMaze, GridMaze, Maze, NodeId};
use amazed::search::observer::{SearchObserver, TaskId};
use amazed::search::parallel::{
    InlineScheduler, PoolScheduler, Scheduler, SearchContext, SearchState, SearchTask,
};
use amazed::search::path::is_simple;
use amazed::search::{SchedulerKind, SearchConfig, Solver};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Records how many times each node was visited and by which task.
#[derive(Default)]
struct VisitLog {
    visits: Mutex<HashMap<NodeId, Vec<TaskId>>>,
    forks: Mutex<Vec<(TaskId, TaskId, NodeId)>>,
}

impl SearchObserver for VisitLog {
    fn on_visit(&self, task: TaskId, node: NodeId) {
        self.visits
            .lock()
            .unwrap()
            .entry(node)
            .or_default()
            .push(task);
    }

    fn on_fork(&self, parent: TaskId, child: TaskId, node: NodeId) {
        self.forks.lock().unwrap().push((parent, child, node));
    }
}

fn reachable_goal<M: Maze>(maze: &M, start: NodeId) -> bool
where
    M::Error: std::fmt::Debug,
{
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(node) = queue.pop_front() {
        if maze.is_goal(node) {
            return true;
        }
        for n in maze.neighbors(node).unwrap() {
            if seen.insert(n) {
                queue.push_back(n);
            }
        }
    }
    false
}

fn random_graph(seed: u64, nodes: usize, goals: usize) -> AdjacencyMaze {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut maze = AdjacencyMaze::new(0);
    for from in 0..nodes {
        for _ in 0..rng.random_range(0..4) {
            maze.add_edge(from, rng.random_range(0..nodes));
        }
    }
    for _ in 0..goals {
        maze.add_goal(rng.random_range(1..nodes));
    }
    maze
}

fn assert_valid_path(maze: &AdjacencyMaze, start: NodeId, path: &[NodeId]) {
    assert_eq!(path.first(), Some(&start), "path must begin at the start");
    assert!(maze.is_goal(*path.last().unwrap()), "path must end at a goal");
    assert!(is_simple(path), "path repeats a node: {:?}", path);
    for pair in path.windows(2) {
        assert!(
            maze.has_edge(pair[0], pair[1]),
            "{} -> {} is not an edge",
            pair[0],
            pair[1]
        );
    }
}

fn run_task<S: Scheduler>(
    maze: &AdjacencyMaze,
    observer: &VisitLog,
    scheduler: &S,
) -> (Option<Vec<NodeId>>, SearchState) {
    let state = SearchState::new(maze.start());
    let ctx = SearchContext {
        maze,
        observer,
        scheduler,
        state: &state,
        fork_after: 1,
    };
    let result = SearchTask::root(ctx).run().unwrap();
    (result, state)
}

fn scheduler_configs() -> Vec<SearchConfig> {
    vec![
        SearchConfig::default().with_workers(4),
        SearchConfig::default().with_scheduler(SchedulerKind::Inline),
    ]
}

#[test]
fn test_scenario_a_single_route() {
    let maze = AdjacencyMaze::from_edges(0, &[(0, 1), (0, 2), (1, 3)], &[3]);

    for config in scheduler_configs() {
        let solver = Solver::new(&maze, config).unwrap();
        assert_eq!(solver.search(0).unwrap(), Some(vec![0, 1, 3]));
    }
}

#[test]
fn test_scenario_b_no_goal() {
    let maze = AdjacencyMaze::from_edges(0, &[(0, 1), (1, 2)], &[]);

    for config in scheduler_configs() {
        let solver = Solver::new(&maze, config).unwrap();
        assert_eq!(solver.search(0).unwrap(), None);
    }
}

#[test]
fn test_scenario_c_two_routes_never_malformed() {
    let maze = AdjacencyMaze::from_edges(0, &[(0, 1), (0, 2), (1, 3), (2, 3)], &[3]);
    let scheduler = PoolScheduler::new(4).unwrap();

    for _ in 0..200 {
        let log = VisitLog::default();
        let (result, state) = run_task(&maze, &log, &scheduler);
        let path = result.expect("a goal is reachable");

        assert!(
            path == [0, 1, 3] || path == [0, 2, 3],
            "unexpected path {:?}",
            path
        );
        assert_eq!(state.winning_path(), Some(path.as_slice()));

        // The root keeps node 1 and forks exactly one child for node 2
        let forks = log.forks.lock().unwrap();
        assert_eq!(forks.len(), 1);
        assert_eq!((forks[0].0, forks[0].2), (0, 2));
    }
}

#[test]
fn test_scenario_d_start_is_goal() {
    let maze = AdjacencyMaze::from_edges(7, &[(7, 8), (7, 9)], &[7, 9]);

    for scheduler in [SchedulerKind::Pool, SchedulerKind::Inline] {
        let log = VisitLog::default();
        let solver = Solver::new(&maze, SearchConfig::default().with_scheduler(scheduler))
            .unwrap()
            .with_observer(&log);

        assert_eq!(solver.search(7).unwrap(), Some(vec![7]));
        assert!(log.forks.lock().unwrap().is_empty());
    }
}

#[test]
fn test_random_graphs_properties() {
    let scheduler = PoolScheduler::new(4).unwrap();

    for seed in 0..60 {
        let goals = (seed % 3) as usize;
        let maze = random_graph(seed, 300, goals);
        let log = VisitLog::default();

        let (result, state) = run_task(&maze, &log, &scheduler);

        // At-most-once processing
        for (node, tasks) in log.visits.lock().unwrap().iter() {
            assert_eq!(tasks.len(), 1, "node {} visited by tasks {:?}", node, tasks);
        }

        // Forest invariant: every claimed node walks back to the start
        let predecessors = state.predecessors();
        let claimed = state.nodes_claimed();
        assert_eq!(predecessors.len() + 1, claimed);
        for &node in predecessors.keys() {
            let path = state.path_to(node).expect("claimed node reaches the start");
            assert!(path.len() <= claimed);
        }

        // Correctness and single winner
        match &result {
            Some(path) => {
                assert_valid_path(&maze, 0, path);
                assert_eq!(state.winning_path(), Some(path.as_slice()));
            }
            None => {
                assert!(!reachable_goal(&maze, 0), "seed {} missed a goal", seed);
                assert!(state.winning_path().is_none());
            }
        }
    }
}

#[test]
fn test_exhaustion_claims_every_reachable_node() {
    let maze = random_graph(99, 500, 0);
    let reachable = {
        let mut seen = HashSet::from([0]);
        let mut queue = VecDeque::from([0]);
        while let Some(node) = queue.pop_front() {
            for n in maze.neighbors(node).unwrap() {
                if seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        seen.len()
    };

    let log = VisitLog::default();
    let (result, state) = run_task(&maze, &log, &PoolScheduler::new(3).unwrap());

    assert_eq!(result, None);
    assert_eq!(state.nodes_claimed(), reachable);
}

#[test]
fn test_inline_and_pool_agree_on_reachability() {
    for seed in 100..120 {
        let maze = random_graph(seed, 200, 1);
        let log = VisitLog::default();

        let (inline, _) = run_task(&maze, &log, &InlineScheduler);
        let (pool, _) = run_task(&maze, &VisitLog::default(), &PoolScheduler::new(2).unwrap());

        assert_eq!(inline.is_some(), pool.is_some(), "seed {}", seed);
    }
}

#[derive(Debug, thiserror::Error)]
#[error("node {0} cannot be expanded")]
struct Blocked(NodeId);

struct BlockedMaze {
    inner: AdjacencyMaze,
    blocked: NodeId,
}

impl Maze for BlockedMaze {
    type Error = Blocked;

    fn start(&self) -> NodeId {
        self.inner.start()
    }

    fn neighbors(&self, node: NodeId) -> Result<Vec<NodeId>, Self::Error> {
        if node == self.blocked {
            return Err(Blocked(node));
        }
        Ok(self.inner.neighbors(node).unwrap_or_default())
    }

    fn is_goal(&self, node: NodeId) -> bool {
        self.inner.is_goal(node)
    }
}

#[test]
fn test_maze_errors_propagate_from_child_tasks() {
    let maze = BlockedMaze {
        inner: AdjacencyMaze::from_edges(0, &[(0, 1), (0, 2), (2, 3)], &[]),
        blocked: 2,
    };

    for config in scheduler_configs() {
        let solver = Solver::new(&maze, config).unwrap();
        let err = solver.search(0).unwrap_err();

        assert_eq!(err.0, 2);
    }
}

#[test]
fn test_generated_grid_maze() {
    let options = GenerateOptions::default()
        .with_size(30, 20)
        .with_seed(7)
        .with_loops(40);
    let maze: GridMaze = generate_maze_with(&options).unwrap();
    let solver = Solver::new(&maze, SearchConfig::default().with_workers(4)).unwrap();

    let outcome = solver.solve().unwrap();
    let path = outcome.path.expect("generated mazes are solvable");

    assert_eq!(path[0], maze.start());
    assert!(maze.is_goal(*path.last().unwrap()));
    assert!(is_simple(&path));
    assert!(path.windows(2).all(|w| maze.are_adjacent(w[0], w[1])));
    assert!(outcome.statistics.nodes_claimed >= path.len() as u64);
}

#[test]
fn test_large_generated_maze_completes() {
    // Long corridors make the fork tree thousands of tasks deep
    let options = GenerateOptions::default().with_size(400, 400).with_seed(1);
    let maze: GridMaze = generate_maze_with(&options).unwrap();

    let configs = [
        SearchConfig::default().with_scheduler(SchedulerKind::Inline),
        SearchConfig::default().with_workers(1),
        SearchConfig::default().with_workers(4),
    ];
    for config in configs {
        let solver = Solver::new(&maze, config).unwrap();
        let path = solver.solve().unwrap().path.expect("generated mazes are solvable");

        assert_eq!(path[0], maze.start());
        assert!(maze.is_goal(*path.last().unwrap()));
        assert!(path.windows(2).all(|w| maze.are_adjacent(w[0], w[1])));
    }
}

#[test]
fn test_large_maze_without_goal_is_exhausted() {
    let options = GenerateOptions::default().with_size(300, 300).with_seed(2);
    let text = generate_maze_with(&options).unwrap().render(None).replace('G', ".");
    let maze = GridMaze::parse(&text).unwrap();

    let outcome = Solver::new(&maze, SearchConfig::default().with_workers(1))
        .unwrap()
        .solve()
        .unwrap();

    assert_eq!(outcome.path, None);
    // Every room and every knocked-through wall between rooms is open
    assert_eq!(outcome.statistics.nodes_claimed, (2 * 300 * 300 - 1) as u64);
}
