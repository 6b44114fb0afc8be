use tiny_render_speed::backend::TextDraw;
use tiny_render_speed::timing::draw_tokens;
use tiny_render_speed::{
    layout_tokens, measure_tokens, BackendKind, Harness, HeuristicMeasure, LayoutParams, LayoutRect,
    Operation, Surface, TimingReport, TokenStore,
};

/// Draws one blended pixel per token and remembers what it was asked to draw
#[derive(Default)]
struct RecordingDraw {
    drawn: Vec<String>,
}

impl TextDraw for RecordingDraw {
    fn draw(&mut self, surface: &mut Surface, text: &str, bounds: LayoutRect) {
        self.drawn.push(text.to_string());
        surface.blend_over(bounds.x as i32, bounds.y as i32, 128);
    }

    fn accumulates(&self) -> bool {
        true
    }
}

fn laid_out(text: &str) -> TokenStore<'_> {
    let mut store = TokenStore::from_text(text, 64).unwrap();
    measure_tokens(&mut store, &mut HeuristicMeasure::new(4.0, 10.0));
    layout_tokens(
        &mut store,
        LayoutParams {
            area_width: 40.0,
            space_dx: 4.0,
            line_dy: 10.0,
        },
    );
    store
}

#[test]
fn test_measure_sample_count() {
    let mut store = TokenStore::from_text("a few words\nhere", 64).unwrap();
    for repeat in [0, 1, 3, 7] {
        let samples = Harness::new(repeat).time_measure(&mut store, &mut HeuristicMeasure::default());
        assert_eq!(samples.len(), repeat);
        assert!(samples.as_slice().iter().all(|&ms| ms >= 0.0));
    }
}

#[test]
fn test_draw_sample_count_and_no_newlines() {
    let store = laid_out("one two\nthree\n");
    let mut draw = RecordingDraw::default();
    let mut surface = Surface::new(64, 64);

    let samples = Harness::new(3).time_draw(&store, &mut draw, &mut surface);

    assert_eq!(samples.len(), 3);
    assert!(samples.as_slice().iter().all(|&ms| ms >= 0.0));
    // 4 drawable tokens per run, never a newline
    assert_eq!(draw.drawn.len(), 12);
    assert!(draw.drawn.iter().all(|t| t != "\n"));
}

#[test]
fn test_draw_clears_between_runs() {
    let store = laid_out("one two three");

    let mut single = Surface::new(64, 64);
    draw_tokens(&store, &mut RecordingDraw::default(), &mut single);

    let mut repeated = Surface::new(64, 64);
    Harness::new(5).time_draw(&store, &mut RecordingDraw::default(), &mut repeated);

    assert_eq!(repeated.pixels(), single.pixels());
}

#[test]
fn test_report_collects_all_pairs() {
    let harness = Harness::default();
    let mut report = TimingReport::new();

    for kind in BackendKind::ALL {
        let mut store = TokenStore::from_text("measure me", 8).unwrap();
        let samples = harness.time_measure(&mut store, &mut HeuristicMeasure::default());
        report.insert(Operation::Measure, kind, samples);

        let mut surface = Surface::new(32, 32);
        let samples = harness.time_draw(&store, &mut RecordingDraw::default(), &mut surface);
        report.insert(Operation::Draw, kind, samples);
    }

    let labels: Vec<_> = report.records().map(|(label, _)| label).collect();
    let expected: Vec<_> = ["fontdue measure", "swash measure", "fontdue draw", "swash draw"]
        .iter()
        .flat_map(|l| std::iter::repeat(l.to_string()).take(3))
        .collect();
    assert_eq!(labels, expected);

    let mut out = Vec::new();
    report.dump(&mut out).unwrap();
    let out = String::from_utf8(out).unwrap();
    assert_eq!(out.lines().count(), 12);
    for line in out.lines() {
        let (_, ms) = line.split_once(',').unwrap();
        assert_eq!(ms.split_once('.').unwrap().1.len(), 4);
    }
}
