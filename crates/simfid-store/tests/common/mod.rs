use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// How a fixture writes its DataArray payloads
#[allow(dead_code)]
#[derive(Clone, Copy)]
pub enum Encoding {
    Ascii,
    Binary,
    Compressed,
}

/// Render one Float64 point-data DataArray
#[allow(dead_code)]
pub fn data_array(name: &str, values: &[f64], encoding: Encoding) -> String {
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    let (format, body) = match encoding {
        Encoding::Ascii => (
            "ascii",
            values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" "),
        ),
        Encoding::Binary => (
            "binary",
            format!(
                "{}{}",
                STANDARD.encode((bytes.len() as u64).to_le_bytes()),
                STANDARD.encode(&bytes)
            ),
        ),
        Encoding::Compressed => {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&bytes).unwrap();
            let block = encoder.finish().unwrap();
            let header: Vec<u8> = [1u64, bytes.len() as u64, bytes.len() as u64, block.len() as u64]
                .iter()
                .flat_map(|v| v.to_le_bytes())
                .collect();
            (
                "binary",
                format!("{}{}", STANDARD.encode(&header), STANDARD.encode(&block)),
            )
        }
    };
    format!(
        r#"<DataArray type="Float64" Name="{}" NumberOfComponents="1" format="{}">{}</DataArray>"#,
        name, format, body
    )
}

/// Render a one-piece `.vtu` document; binary payloads use 64-bit headers
#[allow(dead_code)]
pub fn vtu(arrays: &[(&str, &[f64])], encoding: Encoding) -> String {
    let compressor = match encoding {
        Encoding::Compressed => r#" compressor="vtkZLibDataCompressor""#,
        _ => "",
    };
    let body: String = arrays
        .iter()
        .map(|(name, values)| data_array(name, values, encoding))
        .collect::<Vec<_>>()
        .join("\n        ");
    format!(
        r#"<?xml version="1.0"?>
<VTKFile type="UnstructuredGrid" version="1.0" byte_order="LittleEndian" header_type="UInt64"{}>
  <UnstructuredGrid>
    <Piece NumberOfPoints="0" NumberOfCells="0">
      <PointData>
        {}
      </PointData>
    </Piece>
  </UnstructuredGrid>
</VTKFile>
"#,
        compressor, body
    )
}

/// Render a `.pvtu` index declaring `arrays` over `sources`
#[allow(dead_code)]
pub fn pvtu(arrays: &[&str], sources: &[&str]) -> String {
    let declared: String = arrays
        .iter()
        .map(|name| format!(r#"<PDataArray type="Float64" Name="{}"/>"#, name))
        .collect();
    let pieces: String = sources
        .iter()
        .map(|source| format!(r#"<Piece Source="{}"/>"#, source))
        .collect();
    format!(
        r#"<VTKFile type="PUnstructuredGrid" version="1.0">
  <PUnstructuredGrid GhostLevel="0">
    <PPointData>{}</PPointData>
    {}
  </PUnstructuredGrid>
</VTKFile>
"#,
        declared, pieces
    )
}

#[allow(dead_code)]
pub fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// One-grid triangle description whose payloads live in `fluid.h5`
#[allow(dead_code)]
pub const DESCRIPTION: &str = r#"<?xml version="1.0" ?>
<!DOCTYPE Xdmf SYSTEM "Xdmf.dtd" []>
<Xdmf Version="3.0">
  <Domain>
    <Grid Name="fluid" GridType="Uniform">
      <Topology TopologyType="Triangle" NumberOfElements="1">
        <DataItem Dimensions="1 3" NumberType="Int" Format="HDF">
          fluid.h5:/mesh/connectivity
        </DataItem>
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
