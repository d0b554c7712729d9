//! Criterion benchmarks for tonekit-synth
//!
//! Run with: cargo bench -p tonekit-synth

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tonekit_synth::{
    AdsrParams, EnvelopeCurve, RenderSettings, SAMPLE_RATE, SynthesisRequest, Synthesizer,
    Waveform, WaveformGenerator,
};

const DURATIONS: &[f64] = &[0.1, 1.0, 5.0];

fn bench_waveforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("Waveform");
    let generator = WaveformGenerator::new(SAMPLE_RATE);

    for waveform in Waveform::ALL {
        group.bench_with_input(
            BenchmarkId::new(waveform.name(), "1s"),
            &waveform,
            |b, &waveform| b.iter(|| black_box(generator.generate(waveform, 440.0, 1.0))),
        );
    }

    group.finish();
}

fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("Envelope");
    let params = AdsrParams::default();

    for &duration in DURATIONS {
        let total = (duration * f64::from(SAMPLE_RATE)) as usize;
        group.bench_with_input(BenchmarkId::new("build", total), &total, |b, &total| {
            b.iter(|| black_box(EnvelopeCurve::build(&params, total, SAMPLE_RATE)))
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("Render");
    let request = SynthesisRequest::default();

    for &duration in DURATIONS {
        let settings = RenderSettings {
            duration_secs: duration,
            ..RenderSettings::default()
        };
        if let Ok(synth) = Synthesizer::new(settings) {
            group.bench_with_input(
                BenchmarkId::new("sine_adsr", duration),
                &duration,
                |b, _| b.iter(|| black_box(synth.render(&request))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_waveforms, bench_envelope, bench_render);
criterion_main!(benches);
