mod literal_props;
mod literals;
mod round_trip;
