//! Weighted pathfinding demo on an ASCII map.
//!
//! Walls (`#`) are impassable, swamp (`~`) costs triple, floor (`.`) is
//! cost 1. A few extra walls are scattered at random, then the route from
//! the top-left to the bottom-right corner is printed for several
//! adjacency/cost settings.
//!
//! Run: cargo run --bin maze

use gridpath_astar::PathFinder;
use gridpath_core::{Adjacency, Grid, Point};
use rand::RngExt;

const MAP: &str = "\
....#....~~....
....#....~~....
..........~....
....#......~...
....#..........
....#....#.....
.........#.....";

const EXTRA_WALLS: usize = 8;

fn parse(map: &str) -> Vec<Vec<f32>> {
    map.lines()
        .map(|line| {
            line.chars()
                .map(|ch| match ch {
                    '#' => 0.0,
                    '~' => 3.0,
                    _ => 1.0,
                })
                .collect()
        })
        .collect()
}

fn render(grid: &Grid, path: &[Point], start: Point, target: Point) -> String {
    let mut out = String::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let p = Point::new(x, y);
            let cell = grid.at(p).unwrap_or_default();
            let ch = if p == start {
                'S'
            } else if p == target {
                'T'
            } else if path.contains(&p) {
                'x'
            } else if !cell.walkable() {
                '#'
            } else if cell.cost > 1.0 {
                '~'
            } else {
                '.'
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

fn main() {
    let rows = parse(MAP);
    let mut grid = match Grid::from_costs(&rows) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let start = Point::new(0, 0);
    let target = Point::new(grid.width() - 1, grid.height() - 1);

    let mut rng = rand::rng();
    let mut placed = 0;
    while placed < EXTRA_WALLS {
        let p = Point::new(
            rng.random_range(0..grid.width()),
            rng.random_range(0..grid.height()),
        );
        if p == start || p == target {
            continue;
        }
        if grid.set_cost(p, 0.0).is_ok() {
            placed += 1;
        }
    }

    let mut finder = PathFinder::new();
    let runs = [
        ("8-way, weighted", Adjacency::Diagonal, false),
        ("8-way, ignoring costs", Adjacency::Diagonal, true),
        ("4-way, weighted", Adjacency::Cardinal, false),
    ];
    for (label, adjacency, ignore_costs) in runs {
        match finder.find_path(&grid, start, target, adjacency, ignore_costs) {
            Ok(path) if path.is_empty() => println!("{label}: no path\n"),
            Ok(path) => {
                println!("{label}: {} steps", path.len());
                println!("{}", render(&grid, &path, start, target));
            }
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}
