use std::num::ParseIntError;

use super::welder::{Attribute, VertexKey};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FaceError {
    #[error("A face needs at least three vertices, found {0}")]
    TooFewVertices(usize),
    #[error("Unsupported face vertex syntax: \"{0}\"")]
    UnsupportedSyntax(String),
    #[error("Face vertex \"{token}\" does not match the face mode {mode:?}")]
    MixedModes { token: String, mode: FaceMode },
    #[error("Failed to parse face index: {0}")]
    ParseInt(#[from] ParseIntError),
    #[error("Relative {kind} index {index} reaches before the first of {len} entries")]
    RelativeIndexOutOfRange {
        kind: Attribute,
        index: i32,
        len: usize,
    },
}

/// Which attributes the corners of a face reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceMode {
    /// `p`
    P,
    /// `p/t`
    PT,
    /// `p//n`
    PN,
    /// `p/t/n`
    PTN,
}

impl FaceMode {
    /// Classifies a face vertex by its slash pattern.
    pub fn detect(token: &str) -> Option<FaceMode> {
        let fields: Vec<&str> = token.split('/').collect();
        match fields.as_slice() {
            [p] if !p.is_empty() => Some(FaceMode::P),
            [p, t] if !p.is_empty() && !t.is_empty() => Some(FaceMode::PT),
            [p, t, n] if !p.is_empty() && !n.is_empty() => {
                if t.is_empty() {
                    Some(FaceMode::PN)
                } else {
                    Some(FaceMode::PTN)
                }
            }
            _ => None,
        }
    }

    /// Moves the numeric fields of a face vertex into position/texcoord/normal
    /// order. A `p//n` vertex only has two numbers, so its normal is read into
    /// the texcoord slot and has to be swapped back.
    pub fn arrange(self, mut fields: [i32; 3]) -> [i32; 3] {
        if self == FaceMode::PN {
            fields.swap(1, 2);
        }
        fields
    }
}

/// Number of entries parsed so far for each attribute stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamLengths {
    pub positions: usize,
    pub texcoords: usize,
    pub normals: usize,
}

impl StreamLengths {
    fn of(&self, kind: Attribute) -> usize {
        match kind {
            Attribute::Position => self.positions,
            Attribute::Texcoord => self.texcoords,
            Attribute::Normal => self.normals,
        }
    }
}

/// Converts an obj index to a 0-based one: `0` is absent, positive indices
/// are 1-based and negative ones count back from the end of the stream.
pub fn resolve_index(kind: Attribute, raw: i32, len: usize) -> Result<Option<u32>, FaceError> {
    match raw {
        0 => Ok(None),
        r if r > 0 => Ok(Some(r as u32 - 1)),
        r => {
            let back = r.unsigned_abs() as usize;
            if back > len {
                return Err(FaceError::RelativeIndexOutOfRange {
                    kind,
                    index: r,
                    len,
                });
            }
            Ok(Some((len - back) as u32))
        }
    }
}

/// Reads the numbers of a face vertex in textual order; missing fields stay 0.
fn parse_fields(token: &str) -> Result<[i32; 3], FaceError> {
    let mut fields = [0; 3];
    for (slot, value) in fields
        .iter_mut()
        .zip(token.split('/').filter(|x| !x.is_empty()))
    {
        *slot = value.parse()?;
    }
    Ok(fields)
}

fn parse_face_vertex(
    token: &str,
    mode: FaceMode,
    lengths: StreamLengths,
) -> Result<VertexKey, FaceError> {
    match FaceMode::detect(token) {
        Some(m) if m == mode => {}
        Some(_) => {
            return Err(FaceError::MixedModes {
                token: token.into(),
                mode,
            })
        }
        None => return Err(FaceError::UnsupportedSyntax(token.into())),
    }

    let [p, t, n] = mode.arrange(parse_fields(token)?);
    let resolve = |kind: Attribute, raw: i32| resolve_index(kind, raw, lengths.of(kind));

    Ok(VertexKey {
        position: resolve(Attribute::Position, p)?,
        texcoord: resolve(Attribute::Texcoord, t)?,
        normal: resolve(Attribute::Normal, n)?,
    })
}

/// Fan triangulation around the first corner; convex polygons only.
pub fn triangulate<T: Copy>(corners: &[T]) -> Vec<[T; 3]> {
    match corners.split_first() {
        Some((first, rest)) => rest.windows(2).map(|w| [*first, w[0], w[1]]).collect(),
        None => Vec::new(),
    }
}

/// Parses the vertex tokens of an `f` line into triangles.
///
/// The mode of the first vertex applies to the whole face.
pub fn parse_face(tokens: &[&str], lengths: StreamLengths) -> Result<Vec<[VertexKey; 3]>, FaceError> {
    if tokens.len() < 3 {
        return Err(FaceError::TooFewVertices(tokens.len()));
    }

    let mode =
        FaceMode::detect(tokens[0]).ok_or_else(|| FaceError::UnsupportedSyntax(tokens[0].into()))?;
    let corners = tokens
        .iter()
        .map(|token| parse_face_vertex(token, mode, lengths))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(triangulate(&corners))
}
