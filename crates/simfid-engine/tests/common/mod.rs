use simfid_store::MemoryContainer;
use std::fs;
use std::path::{Path, PathBuf};

/// Write `content` to `dir/name` and return the path
#[allow(dead_code)]
pub fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// A one-piece ASCII `.vtu` document with Float64 point-data arrays
#[allow(dead_code)]
pub fn vtu(arrays: &[(&str, &[f64])]) -> String {
    let body: String = arrays
        .iter()
        .map(|(name, values)| {
            let text = values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            format!(
                r#"        <DataArray type="Float64" Name="{}" format="ascii">{}</DataArray>
"#,
                name, text
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0"?>
<VTKFile type="UnstructuredGrid" version="1.0" byte_order="LittleEndian">
  <UnstructuredGrid>
    <Piece NumberOfPoints="3" NumberOfCells="1">
      <PointData>
{}      </PointData>
    </Piece>
  </UnstructuredGrid>
</VTKFile>
"#,
        body
    )
}

/// One-grid triangle description whose payloads live in `fluid.h5`
#[allow(dead_code)]
pub const DESCRIPTION: &str = r#"<?xml version="1.0" ?>
<Xdmf Version="3.0">
  <Domain>
    <Grid Name="fluid" GridType="Uniform">
      <Topology TopologyType="Triangle" NumberOfElements="1">
        <DataItem Dimensions="1 3" Format="HDF">fluid.h5:/mesh/connectivity</DataItem>
      </Topology>
      <Geometry GeometryType="XY">
        <DataItem Dimensions="3 2" Format="HDF">fluid.h5:/mesh/nodes</DataItem>
      </Geometry>
      <Attribute Name="energy" AttributeType="Scalar" Center="Node">
        <DataItem Dimensions="3" Format="HDF">fluid.h5:/fields/energy</DataItem>
      </Attribute>
    </Grid>
  </Domain>
</Xdmf>
"#;

/// Container contents for [`DESCRIPTION`] stored under `base/fluid.h5`
#[allow(dead_code)]
pub fn fluid_payloads(memory: &mut MemoryContainer, base: &Path, energy: &[f64]) {
    let container = base.join("fluid.h5");
    memory.insert_shaped(&container, "/mesh/connectivity", vec![0.0, 1.0, 2.0], &[1, 3]);
    memory.insert_shaped(
        &container,
        "/mesh/nodes",
        vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
        &[3, 2],
    );
    memory.insert_shaped(&container, "/fields/energy", energy.to_vec(), &[energy.len()]);
}
