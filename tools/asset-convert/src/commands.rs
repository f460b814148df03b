//! Converter implementations behind each subcommand.

use std::path::Path;

use anyhow::{Context, Result, bail};
use mesh_io::{
    load_obj, load_off, load_txt, save_mesh, save_obj, save_off, save_point_cloud_ply, save_txt,
};
use mesh_transform::{CoordinateTransform, instance_template};
use mesh_types::{IndexedMesh, PointCloud, cube, icosahedron};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use voxel_grid::{load_binvox, sample_box_grid, save_binvox};

/// Sphere radius used for points when `--radius` is not given.
pub const DEFAULT_POINT_RADIUS: f64 = 0.0075;

/// Cube half-extent used for voxels when `--radius` is not given.
pub const DEFAULT_VOXEL_RADIUS: f64 = 0.0125;

fn read(path: &Path) {
    println!("Read {}.", path.display());
}

fn wrote(path: &Path) {
    println!("Wrote {}.", path.display());
}

pub fn obj_to_off(input: &Path, output: &Path) -> Result<()> {
    let mesh = load_obj(input).with_context(|| format!("failed to read {}", input.display()))?;
    read(input);
    save_off(&mesh, output).with_context(|| format!("failed to write {}", output.display()))?;
    wrote(output);
    Ok(())
}

pub fn off_to_obj(input: &Path, output: &Path) -> Result<()> {
    let mesh = load_off(input).with_context(|| format!("failed to read {}", input.display()))?;
    read(input);
    save_obj(&mesh, output).with_context(|| format!("failed to write {}", output.display()))?;
    wrote(output);
    Ok(())
}

pub fn txt_to_ply(input: &Path, output: &Path) -> Result<()> {
    let cloud = load_txt(input).with_context(|| format!("failed to read {}", input.display()))?;
    read(input);
    save_point_cloud_ply(&cloud, None, output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    wrote(output);
    Ok(())
}

/// Random points in `[0, 1)^3`.
pub fn random_cloud(count: usize, seed: Option<u64>) -> PointCloud {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    (0..count)
        .map(|_| {
            nalgebra::Point3::new(
                rng.gen_range(0.0..1.0),
                rng.gen_range(0.0..1.0),
                rng.gen_range(0.0..1.0),
            )
        })
        .collect()
}

pub fn write_txt(output: &Path, count: usize, seed: Option<u64>) -> Result<()> {
    let cloud = random_cloud(count, seed);
    save_txt(&cloud, output).with_context(|| format!("failed to write {}", output.display()))?;
    wrote(output);
    Ok(())
}

pub fn write_binvox(output: &Path, size: usize, lo: usize, hi: usize) -> Result<()> {
    let grid = sample_box_grid(size, lo, hi).context("invalid grid size")?;
    debug!(size, lo, hi, occupied = grid.occupied_count(), "Built sample grid");
    save_binvox(&grid, output).with_context(|| format!("failed to write {}", output.display()))?;
    wrote(output);
    Ok(())
}

pub fn binvox_to_txt(input: &Path, output: &Path, transform: &CoordinateTransform) -> Result<()> {
    let grid = load_binvox(input).with_context(|| format!("failed to read {}", input.display()))?;
    read(input);
    let cloud: PointCloud = grid.transformed_centers(transform).collect();
    save_txt(&cloud, output).with_context(|| format!("failed to write {}", output.display()))?;
    wrote(output);
    Ok(())
}

/// Input kinds the `instance` command understands.
enum Instanced {
    Points(PointCloud),
    Voxels(PointCloud),
}

fn load_centers(input: &Path, transform: &CoordinateTransform) -> Result<Instanced> {
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "txt" => {
            let mut cloud =
                load_txt(input).with_context(|| format!("failed to read {}", input.display()))?;
            transform.apply_to_point_cloud(&mut cloud);
            Ok(Instanced::Points(cloud))
        }
        "binvox" => {
            let grid =
                load_binvox(input).with_context(|| format!("failed to read {}", input.display()))?;
            Ok(Instanced::Voxels(grid.transformed_centers(transform).collect()))
        }
        other => bail!("cannot instance .{other} files; expected .txt or .binvox"),
    }
}

/// Materialize spheres for points or cubes for voxels as one mesh.
pub fn instance_mesh(
    input: &Path,
    radius: Option<f64>,
    transform: &CoordinateTransform,
) -> Result<IndexedMesh> {
    let (template, centers, radius) = match load_centers(input, transform)? {
        Instanced::Points(cloud) => (icosahedron(), cloud, radius.unwrap_or(DEFAULT_POINT_RADIUS)),
        Instanced::Voxels(cloud) => (cube(), cloud, radius.unwrap_or(DEFAULT_VOXEL_RADIUS)),
    };
    info!(instances = centers.len(), radius, "Instancing template");
    Ok(instance_template(&template, centers.points, radius))
}

pub fn instance(
    input: &Path,
    output: &Path,
    radius: Option<f64>,
    transform: &CoordinateTransform,
) -> Result<()> {
    let mesh = instance_mesh(input, radius, transform)?;
    read(input);
    save_mesh(&mesh, output).with_context(|| format!("failed to write {}", output.display()))?;
    wrote(output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_io::{load_mesh, load_point_cloud};
    use mesh_transform::Scale;
    use mesh_types::MeshTopology;
    use nalgebra::Vector3;
    use tempfile::tempdir;

    #[test]
    fn obj_off_obj_preserves_mesh() {
        let dir = tempdir().unwrap();
        let obj = dir.path().join("ico.obj");
        let off = dir.path().join("ico.off");
        let back = dir.path().join("back.obj");
        save_obj(&icosahedron(), &obj).unwrap();

        obj_to_off(&obj, &off).unwrap();
        off_to_obj(&off, &back).unwrap();
        assert_eq!(load_obj(&back).unwrap(), icosahedron());
    }

    #[test]
    fn write_txt_is_seeded_and_in_unit_cube() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");

        write_txt(&a, 100, Some(42)).unwrap();
        write_txt(&b, 100, Some(42)).unwrap();
        let cloud = load_point_cloud(&a).unwrap();
        assert_eq!(cloud.len(), 100);
        assert_eq!(cloud, load_point_cloud(&b).unwrap());
        assert!(cloud.iter().all(|p| p.iter().all(|&c| (0.0..1.0).contains(&c))));
    }

    #[test]
    fn txt_to_ply_writes_black_points() {
        let dir = tempdir().unwrap();
        let txt = dir.path().join("p.txt");
        let ply = dir.path().join("p.ply");
        write_txt(&txt, 3, Some(1)).unwrap();

        txt_to_ply(&txt, &ply).unwrap();
        let text = std::fs::read_to_string(&ply).unwrap();
        assert!(text.contains("element vertex 3"));
        let rows: Vec<&str> = text.lines().skip_while(|l| *l != "end_header").skip(1).collect();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.ends_with("0 0 0")));
    }

    #[test]
    fn binvox_round_trip_and_centers() {
        let dir = tempdir().unwrap();
        let binvox = dir.path().join("sample.binvox");
        let txt = dir.path().join("centers.txt");

        write_binvox(&binvox, 8, 0, 2).unwrap();
        assert_eq!(load_binvox(&binvox).unwrap().occupied_count(), 8);

        let transform = CoordinateTransform::new(
            "xyz".parse().unwrap(),
            Scale::Uniform(2.0),
            Vector3::new(1.0, 1.0, 1.0),
        );
        binvox_to_txt(&binvox, &txt, &transform).unwrap();
        let cloud = load_point_cloud(&txt).unwrap();
        assert_eq!(cloud.len(), 8);
        // First voxel center: (0.5 / 8 - 0.5) * 2 + 1 = 0.125
        assert_eq!(cloud.points[0], nalgebra::Point3::new(0.125, 0.125, 0.125));
    }

    #[test]
    fn instance_points_and_voxels() {
        let dir = tempdir().unwrap();
        let txt = dir.path().join("p.txt");
        let binvox = dir.path().join("v.binvox");
        let obj = dir.path().join("spheres.obj");
        let off = dir.path().join("cubes.off");

        write_txt(&txt, 5, Some(3)).unwrap();
        write_binvox(&binvox, 4, 1, 3).unwrap();

        instance(&txt, &obj, None, &CoordinateTransform::identity()).unwrap();
        let spheres = load_mesh(&obj).unwrap();
        assert_eq!(spheres.vertex_count(), 5 * 12);
        assert_eq!(spheres.face_count(), 5 * 20);

        instance(&binvox, &off, Some(0.1), &CoordinateTransform::identity()).unwrap();
        let cubes = load_mesh(&off).unwrap();
        assert_eq!(cubes.vertex_count(), 8 * 8);
        assert_eq!(cubes.face_count(), 8 * 6);
        assert!(cubes.validate().is_ok());
    }

    #[test]
    fn instance_rejects_unknown_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("mesh.obj");
        save_obj(&cube(), &input).unwrap();
        let result = instance_mesh(&input, None, &CoordinateTransform::identity());
        assert!(result.is_err());
    }

    #[test]
    fn conversion_error_names_file() {
        let dir = tempdir().unwrap();
        let bad = dir.path().join("bad.obj");
        std::fs::write(&bad, "f 1 2 3\n").unwrap();
        let err = obj_to_off(&bad, &dir.path().join("out.off")).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("bad.obj"));
        assert!(message.contains("out of range"));
    }
}
