use crate::material::Material;

/// A sub-range of a mesh drawn with one material.
#[derive(Clone, Copy, Debug)]
pub struct Piece<'a> {
    pub material: Material<'a>,
}

#[derive(Clone, Copy, Debug)]
pub struct Mesh<'a> {
    pub pieces: &'a [Piece<'a>],
}
