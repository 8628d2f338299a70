//! Splits a date range into requests the data API will accept.

use crate::types::date_range::DateRange;
use crate::types::product::Product;
use chrono::{NaiveDateTime, TimeDelta};

/// Gap left between the end of one chunk and the start of the next, so the
/// boundary sample is requested only once.
const BOUNDARY_MINUTES: i64 = 6;

/// One bounded request window, inclusive on both ends.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Chunk {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Plans the ordered chunks covering `range` for `product`.
///
/// Chunk starts are `range.start + k * step`; each chunk ends six minutes before
/// the next would start, clamped to `range.end`. An equal start and end gives
/// one degenerate chunk; a reversed range gives none.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use coops::{plan_chunks, DateRange, Product};
///
/// let april = DateRange::from_dates(
///     NaiveDate::from_ymd_opt(2020, 4, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2020, 4, 30).unwrap(),
/// );
/// let chunks = plan_chunks(&april, Product::WaterLevel);
/// assert_eq!(chunks.len(), 1);
/// assert_eq!(chunks[0].end, april.end);
/// ```
pub fn plan_chunks(range: &DateRange, product: Product) -> Vec<Chunk> {
    let step = product.step();
    let reach = step - TimeDelta::minutes(BOUNDARY_MINUTES);

    let mut starts = vec![range.start];
    let mut cursor = range.start;
    while cursor < range.end {
        match cursor.checked_add_signed(step) {
            Some(next) => {
                starts.push(next);
                cursor = next;
            }
            None => break,
        }
    }
    // The loop overshoots by one step unless it lands exactly on the end.
    if starts.last().is_some_and(|last| *last > range.end) {
        starts.pop();
    }

    starts
        .into_iter()
        .map(|start| {
            let end = start
                .checked_add_signed(reach)
                .map_or(range.end, |end| end.min(range.end));
            Chunk { start, end }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn range(start: NaiveDateTime, end: NaiveDateTime) -> DateRange {
        DateRange::new(start, end)
    }

    #[test]
    fn range_within_one_step_is_one_chunk() {
        let r = range(at(2020, 4, 1, 0, 0), at(2020, 4, 30, 0, 0));
        assert_eq!(
            plan_chunks(&r, Product::WaterLevel),
            vec![Chunk {
                start: r.start,
                end: r.end
            }]
        );
    }

    #[test]
    fn chunks_cover_range_without_gaps() {
        let r = range(at(2020, 1, 1, 0, 0), at(2020, 2, 20, 12, 0));
        let chunks = plan_chunks(&r, Product::WaterLevel);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].start, r.start);
        assert_eq!(chunks[0].end, at(2020, 2, 1, 0, 0) - TimeDelta::minutes(6));
        assert_eq!(chunks[1].start, at(2020, 2, 1, 0, 0));
        assert_eq!(chunks[1].end, r.end);
        for pair in chunks.windows(2) {
            assert!(pair[0].start < pair[1].start);
            assert_eq!(pair[1].start - pair[0].end, TimeDelta::minutes(6));
        }
    }

    #[test]
    fn last_chunk_ends_exactly_at_range_end() {
        let r = range(at(2019, 1, 1, 0, 0), at(2019, 3, 3, 17, 42));
        let chunks = plan_chunks(&r, Product::Wind);
        assert_eq!(chunks.last().map(|c| c.end), Some(r.end));
        assert!(chunks.iter().all(|c| c.end <= r.end && c.start <= c.end));
    }

    #[test]
    fn step_depends_on_product() {
        let start = at(2020, 1, 1, 0, 0);
        let r = range(start, start + TimeDelta::days(93));

        // Starts land on 0, 31, 62 and exactly 93 days, so the final chunk
        // is the single instant at the range end.
        let water = plan_chunks(&r, Product::WaterLevel);
        assert_eq!(water.len(), 4);
        assert_eq!(water[3].start, r.end);
        assert_eq!(water[3].end, r.end);

        assert_eq!(plan_chunks(&r, Product::OneMinuteWaterLevel).len(), 19);
        assert_eq!(plan_chunks(&r, Product::HourlyHeight).len(), 1);
        assert_eq!(plan_chunks(&r, Product::Predictions).len(), 1);
    }

    #[test]
    fn two_steps_plus_a_bit_is_three_chunks() {
        let start = at(2020, 1, 1, 0, 0);
        let r = range(start, start + TimeDelta::days(92));
        let chunks = plan_chunks(&r, Product::WaterLevel);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].start, start + TimeDelta::days(62));
        assert_eq!(chunks[2].end, r.end);
    }

    #[test]
    fn equal_bounds_give_one_degenerate_chunk() {
        let t = at(2020, 4, 1, 0, 0);
        assert_eq!(
            plan_chunks(&range(t, t), Product::WaterLevel),
            vec![Chunk { start: t, end: t }]
        );
    }

    #[test]
    fn planning_stops_at_the_end_of_the_calendar() {
        let end = NaiveDateTime::MAX;

        let near = range(end - TimeDelta::days(10), end);
        assert_eq!(
            plan_chunks(&near, Product::WaterLevel),
            vec![Chunk {
                start: near.start,
                end
            }]
        );

        let r = range(end - TimeDelta::days(40), end);
        let chunks = plan_chunks(&r, Product::WaterLevel);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].start, r.start + TimeDelta::days(31));
        assert_eq!(chunks[1].end, end);
    }

    #[test]
    fn reversed_range_gives_no_chunks() {
        let r = range(at(2020, 5, 1, 0, 0), at(2020, 4, 1, 0, 0));
        assert!(plan_chunks(&r, Product::WaterLevel).is_empty());
    }
}
