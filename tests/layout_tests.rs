mod common;

use common::{layout_variants, parse_layout, visualize};
use towerplan::{optimize, CellState, PlanningSession};

const COURTYARD: &str = r#"
    □□□□■□□□
    □■■□■□□□
    □■□□□□■□
    □□□□■■■□
    ■□□□□□□□
"#;

const SPLIT_CITY: &str = r#"
    □□□■□□□
    □□□■□□□
    ■■■■■■■
    □□□■□□□
"#;

#[test]
fn test_optimizer_leaves_no_empty_cells_in_any_orientation() {
    for radius in 0..=3 {
        for (variant, layout) in layout_variants(COURTYARD) {
            let (mut grid, _) = parse_layout(&layout).unwrap();
            let obstacles = grid.obstacle_count();
            let placements = optimize(&mut grid, radius).unwrap();

            assert_eq!(
                grid.count_cells(CellState::Empty),
                0,
                "[{} r={}]\n{}",
                variant,
                radius,
                visualize(&grid, &[])
            );
            assert_eq!(grid.obstacle_count(), obstacles);
            assert!(placements.iter().all(|p| !grid.is_obstacle(p.y, p.x)));
        }
    }
}

#[test]
fn test_optimizer_first_pick_is_largest_footprint() {
    let (mut grid, _) = parse_layout(COURTYARD).unwrap();
    let placements = optimize(&mut grid, 1).unwrap();
    println!("{}", visualize(&grid, &[]));

    // No cell has a fully free 3x3 neighborhood; (6,1) is the first to score 8
    assert_eq!((placements[0].x, placements[0].y), (6, 1));
}

#[test]
fn test_walled_quadrants_stay_disconnected() {
    let (grid, _) = parse_layout(SPLIT_CITY).unwrap();
    let mut session = PlanningSession::new(grid);
    let placements = session.optimize(1).unwrap();
    assert!(placements.len() >= 4, "each quadrant needs its own tower");

    let towers: Vec<_> = session.grid().towers().iter().map(|t| t.position).collect();
    let top_left = towers.iter().find(|p| p.x < 3 && p.y < 2).copied().unwrap();
    let bottom_right = towers.iter().find(|p| p.x > 3 && p.y > 2).copied().unwrap();

    // Radius-1 towers cannot reach across the wall
    let path = session.find_path(top_left, bottom_right).unwrap();
    assert!(path.is_empty(), "{:?}", path);
}

#[test]
fn test_layout_parser_rejects_ragged_rows() {
    assert!(parse_layout("□□□\n□□").is_err());
    assert!(parse_layout("□x□").is_err());
    assert!(parse_layout("").is_err());
}
