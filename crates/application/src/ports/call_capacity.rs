pub trait CallCapacityPort: Send + Sync {
    fn ringing_calls(&self) -> usize;

    fn dialing_calls(&self) -> usize;
}
