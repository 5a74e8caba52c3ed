pub mod direct_mapping;
pub mod indexed_mapping;
pub mod keyed_mapping;

/// Common interface over the child-storage strategies of the inner node
/// variants. Keys are single discriminating bytes; `N` is the child node
/// type.
pub trait NodeMapping<N> {
    fn add_child(&mut self, key: u8, node: N);
    fn seek_child(&self, key: u8) -> Option<&N>;
    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N>;
    fn num_children(&self) -> usize;
    fn width(&self) -> usize;
}
