//! Human-readable dump of record files.
//!
//! Records print as indented `'key': value` lines. Numeric arrays above the
//! configured element count print as a summary (shape, dtype, min/max/mean);
//! smaller arrays print in full with nested brackets.

use std::fmt::Debug;
use std::io::{self, Write};

use ndarray::{ArrayViewD, Axis};

use crate::constants;
use crate::record::{Context, NdArray, Value};

/// Printer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterConfig {
    /// Arrays with more elements than this are summarised.
    pub summary_threshold: usize,
}

impl PrinterConfig {
    /// Never summarise.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            summary_threshold: usize::MAX,
        }
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            summary_threshold: constants::DEFAULT_SUMMARY_THRESHOLD,
        }
    }
}

/// Writes `value` to `out`.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn print_record<W: Write>(value: &Value, config: &PrinterConfig, out: &mut W) -> io::Result<()> {
    Printer { config, out }.value(value, 0)
}

/// Renders `value` into a string.
#[must_use]
pub fn render_record(value: &Value, config: &PrinterConfig) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = print_record(value, config, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

struct Printer<'a, W> {
    config: &'a PrinterConfig,
    out: &'a mut W,
}

impl<W: Write> Printer<'_, W> {
    fn value(&mut self, value: &Value, indent: usize) -> io::Result<()> {
        let pad = "  ".repeat(indent);
        match value {
            Value::Record(record) => {
                if indent == 0 {
                    writeln!(self.out, "{{Record:")?;
                } else {
                    writeln!(self.out, "Record")?;
                }
                for field in record {
                    write!(self.out, "{pad}  '{}': ", field.name)?;
                    self.value(&field.value, indent + 1)?;
                }
                if indent == 0 {
                    writeln!(self.out, "}}")?;
                }
            }
            Value::List(items) => {
                writeln!(self.out, "[")?;
                for item in items {
                    write!(self.out, "{pad}  ")?;
                    self.value(item, indent + 1)?;
                }
                writeln!(self.out, "{pad}]")?;
            }
            Value::Tagged(tagged) => {
                writeln!(self.out, "Tagged")?;
                write!(self.out, "{pad}  'arr': ")?;
                self.array(&tagged.arr, indent + 1)?;
                writeln!(self.out, "{pad}  'context': {}", context_line(&tagged.context))?;
            }
            Value::Array(array) => self.array(array, indent)?,
            Value::Str(s) if s.contains('\n') => {
                writeln!(self.out, "str")?;
                writeln!(self.out, "{pad}    \"\"\"{s}\"\"\"")?;
            }
            Value::Str(s) => writeln!(self.out, "str '{s}'")?,
            Value::Bool(b) => writeln!(self.out, "bool value: {b}")?,
            Value::Int(i) => writeln!(self.out, "int value: {i}")?,
            Value::Float(x) => writeln!(self.out, "float value: {x:?}")?,
        }
        Ok(())
    }

    fn array(&mut self, array: &NdArray, indent: usize) -> io::Result<()> {
        let pad = "  ".repeat(indent);
        let size = array.len();

        if size > self.config.summary_threshold {
            writeln!(
                self.out,
                "array (shape: {:?}, dtype: {}, size: {size} elements)",
                array.shape(),
                array.dtype()
            )?;
            if let Some(stats) = Stats::of(array) {
                writeln!(
                    self.out,
                    "{pad}    min: {:?}, max: {:?}, mean: {:?}",
                    stats.min, stats.max, stats.mean
                )?;
            }
            return Ok(());
        }

        writeln!(
            self.out,
            "array (shape: {:?}, dtype: {})",
            array.shape(),
            array.dtype()
        )?;
        let text = match array {
            NdArray::Float32(a) => format_nd(&a.view(), 0),
            NdArray::Float64(a) => format_nd(&a.view(), 0),
            NdArray::Int64(a) => format_nd(&a.view(), 0),
        };
        for line in text.lines() {
            writeln!(self.out, "{pad}    {line}")?;
        }
        Ok(())
    }
}

fn context_line(context: &Context) -> String {
    match &context.format {
        Some(format) => format!("dtype: {}, format: '{format}'", context.dtype),
        None => format!("dtype: {}", context.dtype),
    }
}

/// Nested-bracket rendering, one innermost row per line.
fn format_nd<T: Debug>(view: &ArrayViewD<'_, T>, depth: usize) -> String {
    match view.ndim() {
        0 => view.iter().next().map(|v| format!("{v:?}")).unwrap_or_default(),
        1 => {
            let items: Vec<String> = view.iter().map(|v| format!("{v:?}")).collect();
            format!("[{}]", items.join(", "))
        }
        _ => {
            let rows: Vec<String> = view
                .axis_iter(Axis(0))
                .map(|sub| format_nd(&sub, depth + 1))
                .collect();
            let sep = format!(",\n{}", " ".repeat(depth + 1));
            format!("[{}]", rows.join(&sep))
        }
    }
}

struct Stats {
    min: f64,
    max: f64,
    mean: f64,
}

impl Stats {
    #[allow(clippy::cast_precision_loss)]
    fn of(array: &NdArray) -> Option<Self> {
        let values: Vec<f64> = match array {
            NdArray::Float32(a) => a.iter().map(|&v| f64::from(v)).collect(),
            NdArray::Float64(a) => a.iter().copied().collect(),
            NdArray::Int64(a) => a.iter().map(|&v| v as f64).collect(),
        };
        if values.is_empty() {
            return None;
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Some(Self { min, max, mean })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{create_proto_motion, MappingPlan};
    use crate::provider::tests::synthetic_data;
    use crate::record::{load_record, save_record, Record, TaggedArray};
    use ndarray::{arr1, arr2, Array3};

    #[test]
    fn test_small_array_printed_in_full() {
        let value = Value::Record(
            Record::new().with("m", Value::Array(NdArray::Float64(arr2(&[[1.0, 2.0], [3.5, -4.0]]).into_dyn()))),
        );
        let out = render_record(&value, &PrinterConfig::default());
        assert_eq!(
            out,
            "{Record:\n  'm': array (shape: [2, 2], dtype: float64)\n      [[1.0, 2.0],\n       [3.5, -4.0]]\n}\n"
        );
    }

    #[test]
    fn test_large_array_summarised() {
        let big = Array3::<f64>::from_shape_fn((10, 10, 11), |(i, _, _)| i as f64);
        let value = Value::Array(NdArray::Float64(big.into_dyn()));
        let out = render_record(&value, &PrinterConfig::default());
        assert!(out.starts_with("array (shape: [10, 10, 11], dtype: float64, size: 1100 elements)"));
        assert!(out.contains("min: 0.0, max: 9.0, mean: 4.5"));
        assert!(!out.contains("[[["));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let value = Value::Array(NdArray::Int64(arr1(&[1_i64, 2, 3]).into_dyn()));
        let at = render_record(&value, &PrinterConfig { summary_threshold: 3 });
        assert!(at.contains("[1, 2, 3]"));
        let below = render_record(&value, &PrinterConfig { summary_threshold: 2 });
        assert!(below.contains("size: 3 elements"));
        assert!(below.contains("min: 1.0, max: 3.0, mean: 2.0"));
    }

    #[test]
    fn test_scalars_and_strings() {
        let value = Value::Record(
            Record::new()
                .with("flag", Value::Bool(false))
                .with("count", Value::Int(3))
                .with("ratio", Value::Float(0.25))
                .with("name", Value::Str("SkeletonMotion".to_string()))
                .with(
                    "names",
                    Value::List(vec![Value::Str("Pelvis".to_string()), Value::Str("L_Hip".to_string())]),
                ),
        );
        let out = render_record(&value, &PrinterConfig::default());
        assert!(out.contains("'flag': bool value: false\n"));
        assert!(out.contains("'count': int value: 3\n"));
        assert!(out.contains("'ratio': float value: 0.25\n"));
        assert!(out.contains("'name': str 'SkeletonMotion'\n"));
        assert!(out.contains("'names': [\n    str 'Pelvis'\n    str 'L_Hip'\n  ]\n"));
    }

    #[test]
    fn test_tagged_context_line() {
        let tagged = TaggedArray::new(NdArray::Float64(arr1(&[1.0, 0.0, 0.0, 0.0]).into_dyn())).with_format("wxyz");
        let value = Value::Record(Record::new().with("rotation", Value::Tagged(tagged)));
        let out = render_record(&value, &PrinterConfig::default());
        assert!(out.contains("'rotation': Tagged\n"));
        assert!(out.contains("'arr': array (shape: [4], dtype: float64)\n"));
        assert!(out.contains("[1.0, 0.0, 0.0, 0.0]"));
        assert!(out.contains("'context': dtype: float64, format: 'wxyz'\n"));
    }

    #[test]
    fn test_written_motion_prints_every_field() {
        let motion = create_proto_motion(&synthetic_data(5, 30.0), &MappingPlan::nymeria()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proto_motion_mapped.npy");
        save_record(&Value::Record(motion.to_record()), &path).unwrap();

        let loaded = load_record(&path).unwrap();
        let out = render_record(&loaded, &PrinterConfig::default());

        for name in [
            "rotation",
            "root_translation",
            "global_velocity",
            "global_angular_velocity",
            "skeleton_tree",
            "node_names",
            "parent_indices",
            "local_translation",
            "is_local",
            "fps",
            "__name__",
        ] {
            assert!(out.contains(&format!("'{name}':")), "missing field {name}");
        }
        for dtype in ["dtype: float64", "dtype: int64", "dtype: float32", "format: 'wxyz'"] {
            assert!(out.contains(dtype), "missing {dtype}");
        }
        assert!(out.contains("[30.0]"));
        assert!(out.contains("str 'R_Hand'"));
        assert!(out.contains(
            "[-1, 0, 1, 2, 3, 0, 5, 6, 7, 0, 9, 10, 11, 12, 11, 14, 15, 16, 17, 11, 19, 20, 21, 22]"
        ));
        assert!(out.contains("[-0.0018, -0.2233, 0.0282]"));
        assert!(out.contains("str 'SkeletonMotion'"));
    }

    #[test]
    fn test_full_config_never_summarises() {
        let big = Array3::<f64>::zeros((20, 10, 10));
        let value = Value::Array(NdArray::Float64(big.into_dyn()));
        let out = render_record(&value, &PrinterConfig::full());
        assert!(!out.contains("elements"));
    }
}
