use image::{DynamicImage, GenericImageView};

use crate::grid::{Grid, Point};

/// Build a grid from a maze bitmap: dark pixels (luma < 128) become walls,
/// light pixels open tiles. Start and end markers are left for the caller
/// to place.
pub fn parse_img(img: &DynamicImage) -> Result<Grid, anyhow::Error> {
    let rows = img.height() as usize;
    let columns = img.width() as usize;

    if rows == 0 || columns == 0 {
        return Err(anyhow::anyhow!("image has no pixels"));
    }

    let mut grid = Grid::new(rows, columns);

    for row in 0..rows {
        for col in 0..columns {
            let p = img.get_pixel(col as u32, row as u32);

            if p.0[0] < 128 {
                grid.tile_mut(Point { row, col }).is_wall = true;
            }
        }
    }

    Ok(grid)
}

#[cfg(test)]
mod test {

    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn dark_pixels_become_walls() {
        let mut img = GrayImage::from_pixel(3, 2, Luma([255u8]));
        img.put_pixel(1, 0, Luma([0u8]));
        img.put_pixel(2, 1, Luma([64u8]));

        let grid = parse_img(&DynamicImage::ImageLuma8(img)).unwrap();

        assert_eq!(grid.rows, 2);
        assert_eq!(grid.columns, 3);
        assert!(grid.tile(Point { row: 0, col: 1 }).is_wall);
        assert!(grid.tile(Point { row: 1, col: 2 }).is_wall);
        assert!(!grid.tile(Point { row: 0, col: 0 }).is_wall);
        assert!(!grid.tile(Point { row: 1, col: 1 }).is_wall);
    }

    #[test]
    fn empty_image_is_rejected() {
        let img = DynamicImage::ImageLuma8(GrayImage::new(0, 0));
        assert!(parse_img(&img).is_err());
    }
}
