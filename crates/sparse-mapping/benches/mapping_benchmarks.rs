//! Benchmarks for sparse voxel lookup and slice coloring.
//!
//! Run with: cargo bench --package sparse-mapping --bench mapping_benchmarks

use cifti_common::{
    IndexType, MatrixAxis, PaletteColorMapping, PaletteFile, PaletteScaleMode, VolumeSpace,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use sparse_mapping::{
    FileKind, IndexerValidation, InMemorySource, MapDescription, MappableDataFile,
    SparseVolumeIndexer, VolumeSliceViewPlane, VoxelMapping,
};

/// Voxels of a brain-shaped ellipsoid filling most of the volume.
fn ellipsoid_voxels(dims: [i64; 3]) -> Vec<VoxelMapping> {
    let center = dims.map(|d| (d as f32 - 1.0) / 2.0);
    let mut voxels = Vec::new();
    for k in 0..dims[2] {
        for j in 0..dims[1] {
            for i in 0..dims[0] {
                let r: f32 = [i, j, k]
                    .iter()
                    .zip(center.iter())
                    .map(|(v, c)| ((*v as f32 - c) / c.max(1.0)).powi(2))
                    .sum();
                if r <= 1.0 {
                    let offset = voxels.len();
                    voxels.push(VoxelMapping::new([i, j, k], offset));
                }
            }
        }
    }
    voxels
}

/// Scalar file with `maps` random maps over an ellipsoid in a `dims` volume.
fn generate_file(dims: [i64; 3], maps: usize) -> MappableDataFile {
    let mut rng = rand::thread_rng();
    let voxels = ellipsoid_voxels(dims);
    let rows = voxels.len();
    let data: Vec<f32> = (0..rows * maps).map(|_| rng.gen_range(-5.0..5.0)).collect();

    let mut mapping = PaletteColorMapping::new("ROY-BIG-BL");
    mapping.set_scale_mode(PaletteScaleMode::AutoScale);

    let mut source = InMemorySource::new(rows, maps)
        .with_mapping_types(IndexType::Scalars, IndexType::BrainModels)
        .with_volume(
            MatrixAxis::AlongColumn,
            VolumeSpace::plumb(dims, [-90.0, -126.0, -72.0], [2.0, 2.0, 2.0]),
            voxels,
        );
    for m in 0..maps {
        source = source.with_map(
            MatrixAxis::AlongRow,
            MapDescription::new(format!("map {}", m)).with_palette_color_mapping(mapping.clone()),
        );
    }
    let source = source.with_data(data).expect("data matches dimensions");

    let mut file = MappableDataFile::new(FileKind::ConnectivityDenseScalar);
    file.load(Box::new(source)).expect("generated file loads");
    file
}

// =============================================================================
// INDEXER BENCHMARKS
// =============================================================================

fn bench_indexer_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("indexer_build");

    for (dims, name) in [([46, 55, 46], "3mm"), ([91, 109, 91], "2mm")] {
        let space = VolumeSpace::plumb(dims, [0.0; 3], [2.0; 3]);
        let voxels = ellipsoid_voxels(dims);
        group.throughput(Throughput::Elements(voxels.len() as u64));

        for validation in [IndexerValidation::Off, IndexerValidation::Log] {
            group.bench_with_input(
                BenchmarkId::new(name, validation.as_str()),
                &voxels,
                |b, voxels| {
                    b.iter(|| {
                        SparseVolumeIndexer::new(Some(&space), black_box(voxels), validation)
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_indexer_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("indexer_lookup");

    let dims = [91, 109, 91];
    let space = VolumeSpace::plumb(dims, [0.0; 3], [2.0; 3]);
    let indexer =
        SparseVolumeIndexer::new(Some(&space), &ellipsoid_voxels(dims), IndexerValidation::Off);

    let mut rng = rand::thread_rng();
    let queries: Vec<[f32; 3]> = (0..10_000)
        .map(|_| {
            [
                rng.gen_range(-10.0..190.0),
                rng.gen_range(-10.0..230.0),
                rng.gen_range(-10.0..190.0),
            ]
        })
        .collect();
    group.throughput(Throughput::Elements(queries.len() as u64));

    group.bench_function("10k_coordinates", |b| {
        b.iter(|| {
            for xyz in &queries {
                black_box(indexer.offset_for_coordinate(xyz[0], xyz[1], xyz[2]));
            }
        });
    });

    group.finish();
}

// =============================================================================
// COLORING BENCHMARKS
// =============================================================================

fn bench_map_coloring(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_coloring");
    let palettes = PaletteFile::builtin();

    for (dims, name) in [([46, 55, 46], "3mm"), ([91, 109, 91], "2mm")] {
        let mut file = generate_file(dims, 1);
        group.throughput(Throughput::Elements(file.number_of_rows() as u64));

        group.bench_function(name, |b| {
            b.iter(|| file.update_scalar_coloring_for_map(0, black_box(&palettes)));
        });
    }

    group.finish();
}

fn bench_slice_coloring(c: &mut Criterion) {
    let mut group = c.benchmark_group("slice_coloring");

    let dims = [91, 109, 91];
    let mut file = generate_file(dims, 1);
    file.update_scalar_coloring_for_map(0, &PaletteFile::builtin())
        .expect("map 0 exists");

    for (plane, slice) in [
        (VolumeSliceViewPlane::Axial, dims[2] / 2),
        (VolumeSliceViewPlane::Coronal, dims[1] / 2),
        (VolumeSliceViewPlane::Parasagittal, dims[0] / 2),
    ] {
        let count = file.voxel_count_in_slice(plane);
        let mut rgba = vec![0u8; count * 4];
        group.throughput(Throughput::Bytes((count * 4) as u64));

        group.bench_function(plane.as_str(), |b| {
            b.iter(|| file.voxel_colors_for_slice_in_map(0, plane, black_box(slice), &mut rgba));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_indexer_build,
    bench_indexer_lookup,
    bench_map_coloring,
    bench_slice_coloring,
);
criterion_main!(benches);
