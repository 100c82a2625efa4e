use gridpath::{run, Grid, Point};

const DEMO: &str = "\
S....X...
.XXX.X.X.
...X.X.X.
.X.X...X.
.X.XXXXX.
.X......E";

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let mut grid: Grid = match std::env::args().nth(1) {
        Some(path) if path.ends_with(".png") => {
            let img = image::open(&path)?;
            gridpath::util::parse_img(&img)?
        }
        Some(path) => std::fs::read_to_string(&path)?.parse()?,
        None => DEMO.parse()?,
    };

    let (start, end) = match (grid.start(), grid.end()) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            // maze bitmaps carry no markers, fall back to opposite corners
            let start = Point { row: 0, col: 0 };
            let end = Point {
                row: grid.rows - 1,
                col: grid.columns - 1,
            };
            grid.set_start(start);
            grid.set_end(end);
            (start, end)
        }
    };

    log::info!("searching {}x{} grid", grid.rows, grid.columns);
    let result = run(&mut grid, start, end)?;

    print!("{}", grid);
    if result.path.is_empty() {
        println!("no route found ({} tiles searched)", result.traversed.len());
    } else {
        println!(
            "route of {} tiles found, {} tiles searched",
            result.path.len(),
            result.traversed.len()
        );
    }

    Ok(())
}
