//! Integration tests for the ndarray feature
#![cfg(feature = "ndarray")]

use std::io::Cursor;

use ndarray::{array, ArrayD};
use sdds::{from_reader, to_bytes, ArrayValue, DataMode, Definition, SddsFile, Value};

#[test]
fn decoded_array_indexes_as_ndarray() {
    let file = b"SDDS1
&array name=grid, type=double, dimensions=2, &end
&data mode=ascii, &end
2 3
1 2 3 4 5 6
";
    let document = from_reader(Cursor::new(&file[..])).unwrap();
    let (_, value) = document.get("grid").unwrap();

    let grid: ArrayD<f64> = value.as_array().unwrap().to_ndarray().unwrap();
    assert_eq!(grid.shape(), &[2, 3]);
    assert_eq!(grid[[0, 0]], 1.0);
    assert_eq!(grid[[1, 2]], 6.0);
}

#[test]
fn ndarray_built_document_roundtrips() {
    let grid = array![[1.0f32, 2.0], [3.0, 4.0]].into_dyn();
    let mut definition = sdds::ArrayDef::new("grid", sdds::SddsType::Float);
    definition.dimensions = Some(2);

    let document = SddsFile::new(
        None,
        vec![Definition::Array(definition)],
        vec![Value::Array(ArrayValue::from_ndarray(grid.clone()).unwrap())],
    )
    .unwrap();

    let bytes = to_bytes(&document, DataMode::Binary).unwrap();
    let restored = from_reader(Cursor::new(bytes)).unwrap();
    let (_, value) = restored.get("grid").unwrap();
    let back: ArrayD<f32> = value.as_array().unwrap().to_ndarray().unwrap();
    assert_eq!(back, grid);
}
