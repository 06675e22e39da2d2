use nalgebra::Point3;
use tobj::Mesh;

/// Vertex storage for triangle lists. Coordinates live in three parallel rows
/// and every three consecutive vertices form one triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonMatrix {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl PolygonMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize) -> Self {
        PolygonMatrix {
            x: Vec::with_capacity(vertices),
            y: Vec::with_capacity(vertices),
            z: Vec::with_capacity(vertices),
        }
    }

    /// Unrolls an indexed mesh into consecutive triangle vertices.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let mut polygons = PolygonMatrix::with_capacity(mesh.indices.len());

        for index in &mesh.indices {
            let i = *index as usize;
            polygons.add_point(Point3::new(
                mesh.positions[3 * i] as f64,
                mesh.positions[3 * i + 1] as f64,
                mesh.positions[3 * i + 2] as f64,
            ));
        }

        polygons
    }

    pub fn add_point(&mut self, point: Point3<f64>) {
        self.x.push(point.x);
        self.y.push(point.y);
        self.z.push(point.z);
    }

    pub fn add_polygon(&mut self, p0: Point3<f64>, p1: Point3<f64>, p2: Point3<f64>) {
        self.add_point(p0);
        self.add_point(p1);
        self.add_point(p2);
    }

    pub fn vertex(&self, i: usize) -> Point3<f64> {
        Point3::new(self.x[i], self.y[i], self.z[i])
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::Point3;
    use tobj::Mesh;

    use crate::polygons::PolygonMatrix;

    #[test]
    fn it_stores_points_in_parallel_rows() {
        let mut polygons = PolygonMatrix::new();
        polygons.add_polygon(
            Point3::new(0.0, 1.0, 2.0),
            Point3::new(3.0, 4.0, 5.0),
            Point3::new(6.0, 7.0, 8.0),
        );

        assert_eq!(vec![0.0, 3.0, 6.0], polygons.x);
        assert_eq!(vec![1.0, 4.0, 7.0], polygons.y);
        assert_eq!(vec![2.0, 5.0, 8.0], polygons.z);
        assert_eq!(Point3::new(3.0, 4.0, 5.0), polygons.vertex(1));
        assert_eq!(1, polygons.triangle_count());
    }

    #[test]
    fn it_unrolls_indexed_meshes() {
        let mesh = Mesh {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0],
            indices: vec![0, 1, 2, 0, 2, 3],
            ..Default::default()
        };

        let polygons = PolygonMatrix::from_mesh(&mesh);

        assert_eq!(6, polygons.len());
        assert_eq!(2, polygons.triangle_count());
        assert_eq!(Point3::new(1.0, 1.0, 0.0), polygons.vertex(4));
        assert_eq!(Point3::new(0.0, 1.0, 0.0), polygons.vertex(5));
    }
}
