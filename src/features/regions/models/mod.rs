mod district;
mod municipality;
mod province;

pub use district::District;
pub use municipality::Municipality;
pub use province::Province;
