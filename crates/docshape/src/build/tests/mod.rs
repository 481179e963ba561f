mod behaviors;
mod discriminators;
mod transactional;
