fn main() {
    orbit_arsenal::game::run();
}
