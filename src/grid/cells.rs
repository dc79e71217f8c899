//! Cell-wise evaluation over reconciled grids.
//!
//! Cells are independent, so with the `rayon` feature large grids are split
//! across the global thread pool. Below `Settings::parallel_min_cells` the
//! serial path is used.

use ndarray::{Array2, Zip};

use crate::models::Settings;

#[cfg(feature = "rayon")]
fn parallel(cells: usize, settings: &Settings) -> bool {
    cells >= settings.parallel_min_cells
}

/// Applies `f` to every cell of one grid.
pub fn map1<F>(a: &Array2<f64>, settings: &Settings, f: F) -> Array2<f64>
where
    F: Fn(f64) -> f64 + Sync + Send,
{
    let zip = Zip::from(a);
    #[cfg(feature = "rayon")]
    if parallel(a.len(), settings) {
        return zip.par_map_collect(|&x| f(x));
    }
    let _ = settings;
    zip.map_collect(|&x| f(x))
}

/// Applies `f` cell by cell to three grids of identical shape.
pub fn map3<F>(
    a: &Array2<f64>,
    b: &Array2<f64>,
    c: &Array2<f64>,
    settings: &Settings,
    f: F,
) -> Array2<f64>
where
    F: Fn(f64, f64, f64) -> f64 + Sync + Send,
{
    let zip = Zip::from(a).and(b).and(c);
    #[cfg(feature = "rayon")]
    if parallel(a.len(), settings) {
        return zip.par_map_collect(|&x, &y, &z| f(x, y, z));
    }
    let _ = settings;
    zip.map_collect(|&x, &y, &z| f(x, y, z))
}

/// Applies `f` cell by cell to four grids of identical shape.
pub fn map4<F>(
    a: &Array2<f64>,
    b: &Array2<f64>,
    c: &Array2<f64>,
    d: &Array2<f64>,
    settings: &Settings,
    f: F,
) -> Array2<f64>
where
    F: Fn(f64, f64, f64, f64) -> f64 + Sync + Send,
{
    let zip = Zip::from(a).and(b).and(c).and(d);
    #[cfg(feature = "rayon")]
    if parallel(a.len(), settings) {
        return zip.par_map_collect(|&w, &x, &y, &z| f(w, x, y, z));
    }
    let _ = settings;
    zip.map_collect(|&w, &x, &y, &z| f(w, x, y, z))
}
