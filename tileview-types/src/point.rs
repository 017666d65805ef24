/// Creates a new `geo_types::Point<f64>` from longitude and latitude values (in degrees).
///
/// ```
/// use tileview_types::lonlat;
///
/// let point = lonlat!(52.0, 38.0);
/// assert_eq!(point.x(), 52.0);
/// assert_eq!(point.y(), 38.0);
/// ```
#[macro_export]
macro_rules! lonlat {
    ($lon:expr, $lat:expr) => {
        $crate::geo_types::Point::<f64>::new($lon, $lat)
    };
}
