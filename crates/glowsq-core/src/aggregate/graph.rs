use serde::{Deserialize, Serialize};

use crate::model::PeriodStat;

pub const DEFAULT_GRAPH_WIDTH: usize = 128;
pub const DEFAULT_GRAPH_HEIGHT: u32 = 16;

/// Lower bounds for the graph's vertical scale.
///
/// With a floor of e.g. 50 MB per sample, a quiet evening draws as a few
/// short columns instead of being stretched to full height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphScale {
    #[serde(default)]
    pub floor_rx: u64,
    #[serde(default)]
    pub floor_tx: u64,
}

/// Display geometry for one graph request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphOptions {
    /// Display width in pixels.
    pub width: usize,
    /// Display height in pixels; bar heights never exceed it.
    pub height: u32,
    pub scale: GraphScale,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRAPH_WIDTH,
            height: DEFAULT_GRAPH_HEIGHT,
            scale: GraphScale::default(),
        }
    }
}

/// Bar heights plus the raw byte values the display prints beside them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    /// Interleaved `rx, tx` bar heights, oldest sample first.
    pub heights: Vec<u32>,
    /// Largest rx sample in the window (floors not applied).
    pub max_rx: u64,
    /// Largest tx sample in the window (floors not applied).
    pub max_tx: u64,
    /// rx bytes of the last drawn sample.
    pub curr_rx: u64,
    /// tx bytes of the last drawn sample.
    pub curr_tx: u64,
}

/// Scale the trailing 5-minute samples into bar heights.
///
/// Maxima come from the last `width` samples; bars are drawn for the last
/// `width / 2` samples, two bars (rx then tx) per sample. Both series
/// share one vertical scale, the larger of the two maxima and floors.
pub fn build_graph(minutes: &[PeriodStat], options: &GraphOptions) -> Graph {
    let window = tail(minutes, options.width);
    let max_rx = window.iter().map(|s| s.wan_rx_bytes).max().unwrap_or(0);
    let max_tx = window.iter().map(|s| s.wan_tx_bytes).max().unwrap_or(0);

    let scale_max = max_rx
        .max(options.scale.floor_rx)
        .max(max_tx)
        .max(options.scale.floor_tx);

    let sampled = tail(minutes, options.width / 2);
    let mut heights = Vec::with_capacity(sampled.len() * 2);
    let (mut curr_rx, mut curr_tx) = (0, 0);

    for stat in sampled {
        curr_rx = stat.wan_rx_bytes;
        curr_tx = stat.wan_tx_bytes;
        heights.push(bar_height(curr_rx, scale_max, options.height));
        heights.push(bar_height(curr_tx, scale_max, options.height));
    }

    Graph {
        heights,
        max_rx,
        max_tx,
        curr_rx,
        curr_tx,
    }
}

/// The last `n` items, or all of them when there are fewer.
fn tail<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

/// `ceil(bytes / scale_max * height)` in exact integer arithmetic; 0 for an
/// empty scale.
fn bar_height(bytes: u64, scale_max: u64, height: u32) -> u32 {
    if scale_max == 0 {
        return 0;
    }
    let bytes = u128::from(bytes.min(scale_max));
    let pixels = (bytes * u128::from(height)).div_ceil(u128::from(scale_max));
    u32::try_from(pixels).unwrap_or(height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(rx: u64, tx: u64) -> PeriodStat {
        PeriodStat {
            timestamp_ms: 0,
            wan_tx_bytes: tx,
            wan_rx_bytes: rx,
        }
    }

    fn opts(width: usize, height: u32) -> GraphOptions {
        GraphOptions {
            width,
            height,
            scale: GraphScale::default(),
        }
    }

    #[test]
    fn two_samples_on_a_four_pixel_display() {
        let minutes = vec![sample(100, 50), sample(200, 100)];
        let graph = build_graph(&minutes, &opts(4, 10));

        assert_eq!(graph.heights, vec![5, 3, 10, 5]);
        assert_eq!(graph.max_rx, 200);
        assert_eq!(graph.max_tx, 100);
        assert_eq!(graph.curr_rx, 200);
        assert_eq!(graph.curr_tx, 100);
    }

    #[test]
    fn empty_input_is_all_zero() {
        let graph = build_graph(&[], &GraphOptions::default());
        assert_eq!(graph, Graph::default());
    }

    #[test]
    fn zero_traffic_draws_flat_bars() {
        let minutes = vec![sample(0, 0); 4];
        let graph = build_graph(&minutes, &opts(8, 16));
        assert_eq!(graph.heights, vec![0; 8]);
        assert_eq!(graph.max_rx, 0);
    }

    #[test]
    fn degenerate_widths_draw_nothing() {
        let minutes = vec![sample(10, 20), sample(30, 40)];

        let zero = build_graph(&minutes, &opts(0, 16));
        assert!(zero.heights.is_empty());
        assert_eq!((zero.max_rx, zero.max_tx), (0, 0));
        assert_eq!((zero.curr_rx, zero.curr_tx), (0, 0));

        let one = build_graph(&minutes, &opts(1, 16));
        assert!(one.heights.is_empty());
        assert_eq!((one.max_rx, one.max_tx), (30, 40));
        assert_eq!((one.curr_rx, one.curr_tx), (0, 0));
    }

    #[test]
    fn maxima_use_full_width_but_bars_use_half() {
        // Peak sits outside the drawn half but inside the maxima window.
        let minutes = vec![sample(1000, 500), sample(10, 10), sample(250, 100), sample(500, 0)];
        let graph = build_graph(&minutes, &opts(4, 8));

        assert_eq!(graph.max_rx, 1000);
        assert_eq!(graph.max_tx, 500);
        assert_eq!(graph.heights, vec![2, 1, 4, 0]);
        assert_eq!((graph.curr_rx, graph.curr_tx), (500, 0));
    }

    #[test]
    fn window_ignores_older_samples() {
        let mut minutes = vec![sample(9_999, 9_999)];
        minutes.extend(std::iter::repeat_n(sample(10, 5), 4));
        let graph = build_graph(&minutes, &opts(4, 10));

        assert_eq!(graph.max_rx, 10);
        assert_eq!(graph.max_tx, 5);
        assert_eq!(graph.heights, vec![10, 5, 10, 5]);
    }

    #[test]
    fn odd_width_rounds_the_half_down() {
        let minutes = vec![sample(1, 1); 10];
        let graph = build_graph(&minutes, &opts(5, 4));
        assert_eq!(graph.heights.len(), 4);
    }

    #[test]
    fn floors_raise_the_shared_scale_but_not_the_labels() {
        let minutes = vec![sample(100, 20)];
        let options = GraphOptions {
            width: 2,
            height: 10,
            scale: GraphScale {
                floor_rx: 1000,
                floor_tx: 0,
            },
        };
        let graph = build_graph(&minutes, &options);

        assert_eq!(graph.max_rx, 100);
        assert_eq!(graph.max_tx, 20);
        assert_eq!(graph.heights, vec![1, 1]);
    }

    #[test]
    fn tx_peak_sets_the_scale_for_rx_too() {
        let minutes = vec![sample(25, 100), sample(50, 100)];
        let graph = build_graph(&minutes, &opts(4, 4));
        assert_eq!(graph.heights, vec![1, 4, 2, 4]);
    }

    #[test]
    fn zero_height_is_all_zero() {
        let minutes = vec![sample(5, 5), sample(7, 3)];
        let graph = build_graph(&minutes, &opts(4, 0));
        assert_eq!(graph.heights, vec![0, 0, 0, 0]);
        assert_eq!(graph.curr_rx, 7);
    }

    #[test]
    fn bar_height_rounds_up_partial_pixels() {
        assert_eq!(bar_height(1, 1000, 16), 1);
        assert_eq!(bar_height(3, 10, 10), 3);
        assert_eq!(bar_height(u64::MAX, u64::MAX, u32::MAX), u32::MAX);
        assert_eq!(bar_height(0, 0, 16), 0);
    }
}
