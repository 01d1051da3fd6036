use std::ops::{Index, IndexMut, Mul};
use crate::Length;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector {
    pub x: Length,
    pub y: Length,
}

pub trait Dot<Rhs = Self> {
    type Output;
    fn dot(self, other: Rhs) -> Self::Output;
}

impl Dot for Vector {
    type Output = Length;
    fn dot(self, other: Self) -> Length { self.x * other.x + self.y * other.y }
}

impl Mul<f64> for Vector {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Vector {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl Index<usize> for Vector {
    type Output = Length;
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("index {index} is out of bounds [0,1]")
        }
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("index {index} is out of bounds [0,1]")
        }
    }
}

impl Vector {

    pub fn new(x: Length, y: Length) -> Self { Self { x, y } }

    pub fn magnitude(&self) -> Length { self.x.hypot(self.y) }

    pub fn normalize(self) -> Self { self * (1.0 / self.magnitude()) }

    /// Which component is smallest, and its value. Ties go to `x`.
    pub fn argmin(self) -> (usize, Length) {
        if self.y < self.x { (1, self.y) }
        else               { (0, self.x) }
    }
}
